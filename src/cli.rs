// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line front end over the profile tracker.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::models::{Entry, MealType, ProfileSettings, Region, TransportMode};
use crate::services::equivalence::{self, round_nice, Equivalents};
use crate::services::report;
use crate::services::{DaySummary, ProfileTracker, SaveOutcome};
use crate::store::JsonFileStore;
use crate::time_utils::today_local;

#[derive(Debug, Parser)]
#[command(name = "campus-co2", version, about = "Log your day, see trends, earn points")]
pub struct Cli {
    /// Profile id to act on (defaults to the active profile)
    #[arg(long, global = true, env = "CO2_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List profiles
    Profiles,

    /// Create a profile and make it active
    CreateProfile { name: String },

    /// Delete a profile and all of its entries
    DeleteProfile { id: String },

    /// Switch the active profile
    Use { id: String },

    /// Change name, baseline habits, or daily goal
    SetBaseline {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mode: Option<TransportMode>,
        #[arg(long)]
        occupancy: Option<f64>,
        #[arg(long)]
        meal: Option<MealType>,
        /// Daily goal in kg CO2e
        #[arg(long)]
        goal: Option<f64>,
    },

    /// Save an entry from a JSON file (replaces any entry for that date)
    Log { file: PathBuf },

    /// Show the footprint, savings, and missions for a day
    Summary {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show daily totals for the last 7 days
    Trend,

    /// Write the profile's history as CSV
    Export {
        /// Output path (default `<name>_co2_log.csv`)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Express a kg CO2e figure in everyday units
    Meaning {
        kg: f64,
        #[arg(long)]
        region: Option<Region>,
    },

    /// Reset the profile's points to zero (badges are kept)
    ResetPoints,
}

/// Run one command against the store described by `config`.
pub fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&config.store_dir)
        .with_context(|| format!("opening store at {}", config.store_dir.display()))?;
    let mut tracker = ProfileTracker::open(store)?;
    let today = today_local();
    let selected = cli.profile.as_deref();

    match cli.command {
        Commands::Profiles => {
            if tracker.profiles().is_empty() {
                println!("No profiles yet. Create one with `campus-co2 create-profile <NAME>`.");
            }
            for profile in tracker.profiles() {
                let marker = if tracker.active_id() == Some(profile.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {}  ({} entries, {} points)",
                    marker,
                    profile.id,
                    profile.name,
                    profile.entries.len(),
                    profile.points
                );
            }
        }
        Commands::CreateProfile { name } => {
            let profile = tracker.create_profile(&name)?;
            println!("Created {} ({})", profile.name, profile.id);
        }
        Commands::DeleteProfile { id } => {
            tracker.delete_profile(&id)?;
            println!("Deleted {}", id);
        }
        Commands::Use { id } => {
            tracker.set_active(&id)?;
            println!("Active profile is now {}", id);
        }
        Commands::SetBaseline {
            name,
            mode,
            occupancy,
            meal,
            goal,
        } => {
            let id = tracker.resolve(selected)?.id.clone();
            let settings = ProfileSettings {
                name,
                baseline_mode: mode,
                baseline_occupancy: occupancy,
                baseline_meal_type: meal,
                daily_goal_kg: goal,
            };
            let profile = tracker.update_settings(&id, settings)?;
            println!(
                "{}: baseline {} (x{}) / {} meals, goal {} kg",
                profile.name,
                profile.baseline_mode.label(),
                profile.baseline_occupancy,
                profile.baseline_meal_type.label(),
                profile.daily_goal_kg
            );
        }
        Commands::Log { file } => {
            let id = tracker.resolve(selected)?.id.clone();
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let entry: Entry = serde_json::from_str(&raw)
                .with_context(|| format!("parsing entry in {}", file.display()))?;
            let outcome = tracker.save_entry(&id, entry)?;
            print_save_outcome(&outcome);
            println!("Streak: {} day(s)", tracker.streak(&id, today)?);
        }
        Commands::Summary { date } => {
            let profile = tracker.resolve(selected)?;
            let date = date.unwrap_or(today);
            println!(
                "{}: {} points, streak {} day(s)",
                profile.name,
                profile.points,
                tracker.streak(&profile.id, today)?
            );
            if !profile.badges.is_empty() {
                let labels: Vec<&str> = profile.badges.iter().map(|b| b.label()).collect();
                println!("Badges: {}", labels.join(", "));
            }
            match profile.entry_for(date) {
                Some(entry) => print_summary(&tracker.preview(&profile.id, entry)?),
                None => println!("No entry for {}", date),
            }
        }
        Commands::Trend => {
            let profile = tracker.resolve(selected)?;
            for point in report::weekly_trend(profile, today) {
                println!("{}  {:>7.2} kg", point.date, point.kg);
            }
        }
        Commands::Export { out } => {
            let profile = tracker.resolve(selected)?;
            let path = out.unwrap_or_else(|| PathBuf::from(report::export_filename(profile)));
            let file = fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            report::write_csv(profile, file)?;
            println!("Wrote {} entries to {}", profile.entries.len(), path.display());
        }
        Commands::ResetPoints => {
            let id = tracker.resolve(selected)?.id.clone();
            tracker.reset_points(&id)?;
            println!("Points reset");
        }
        Commands::Meaning { kg, region } => {
            let region = region.unwrap_or(config.default_region);
            print_equivalents(
                &format!("{} kg CO2e", kg),
                &equivalence::equivalents(kg, region),
                region,
            );
        }
    }

    Ok(())
}

fn print_summary(summary: &DaySummary) {
    let fp = &summary.footprint;
    println!("{}", summary.date);
    println!("  Transport    {:>7.2} kg", fp.transport_kg);
    println!("  Food         {:>7.2} kg", fp.food_kg);
    println!("  Electricity  {:>7.2} kg", fp.electricity_kg);
    println!("  Total        {:>7.2} kg", fp.total_kg);
    println!("  Baseline     {:>7.2} kg", summary.baseline_kg);
    println!("  Saved        {:>7.2} kg", summary.savings_kg);
    println!("Missions ({} points):", summary.mission_points);
    for mission in &summary.missions {
        let check = if mission.done { "x" } else { " " };
        println!("  [{}] {} (+{})", check, mission.label, mission.points);
    }

    let card = &summary.meaning;
    print_equivalents("Today's footprint", &card.total, card.region);
    if let Some(saved) = &card.saved {
        print_equivalents("What you saved (vs baseline)", saved, card.region);
    }
}

fn print_save_outcome(outcome: &SaveOutcome) {
    print_summary(&outcome.summary);
    if outcome.was_new_day {
        println!("+{} points", outcome.points_awarded);
    } else {
        println!("Updated existing entry (points already counted for this day)");
    }
    for badge in &outcome.new_badges {
        println!("New badge: {}", badge.label());
    }
}

fn print_equivalents(title: &str, eq: &Equivalents, region: Region) {
    println!("{}:", title);
    println!("  Driving equivalent     {} km", round_nice(eq.driving_km));
    println!("  Streaming video        {} hours", round_nice(eq.streaming_hours));
    println!(
        "  One tree absorb time   ~{}-{} days",
        round_nice(eq.tree_days_low),
        round_nice(eq.tree_days_high)
    );
    println!(
        "  Phone charges          ~{} ({} grid)",
        round_nice(eq.phone_charges),
        region
    );
}
