// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-entry figures for export, CSV rendering, and the weekly trend.

use anyhow::Context;
use chrono::{Days, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::io;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::{Meal, Profile, Trip};
use crate::services::footprint::{self, Footprint};

/// Days shown in the trend series, ending today.
pub const TREND_DAYS: u64 = 7;

/// Decimal places for exported kilogram figures.
const CSV_PRECISION: usize = 3;

/// Export header, one column per field.
pub const CSV_COLUMNS: [&str; 15] = [
    "date",
    "transport_kg",
    "food_kg",
    "electricity_kg",
    "total_kg",
    "baseline_kg",
    "savings_kg",
    "province",
    "household_size",
    "electricity_level",
    "refills",
    "nature_minutes",
    "trips",
    "meals",
    "notes",
];

/// Computed figures for one logged day, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct EntryReport {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub footprint: Footprint,
    pub baseline_kg: f64,
    pub savings_kg: f64,
}

/// Reports for every entry in `profile`, oldest first.
pub fn entry_reports(profile: &Profile) -> Vec<EntryReport> {
    let habits = profile.baseline_habits();
    profile
        .sorted_entries()
        .into_iter()
        .map(|entry| {
            let footprint = Footprint::of(entry);
            let baseline_kg = footprint::baseline_kg(&habits, entry);
            EntryReport {
                date: entry.date,
                footprint,
                baseline_kg,
                savings_kg: baseline_kg - footprint.total_kg,
            }
        })
        .collect()
}

fn describe_trip(trip: &Trip) -> String {
    let occupancy = trip
        .occupancy
        .filter(|o| *o != 0.0 && !o.is_nan())
        .map(|o| format!(" occ={}", o))
        .unwrap_or_default();
    format!(
        "{}({}km {}{})",
        trip.label,
        trip.distance_km,
        trip.mode.as_str(),
        occupancy
    )
}

fn describe_meal(meal: &Meal) -> String {
    format!("{}({})", meal.label, meal.meal_type.as_str())
}

fn kg(value: f64) -> String {
    format!("{:.*}", CSV_PRECISION, value)
}

/// Write the profile's history as CSV to `out`, one row per entry sorted
/// by date, and hand `out` back once everything is flushed.
///
/// Fields are quoted only when they contain a delimiter, quote, or line
/// break.
pub fn write_csv<W: io::Write>(profile: &Profile, out: W) -> Result<W> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(CSV_COLUMNS).context("writing CSV header")?;

    let mut rows = 0usize;
    for (entry, report) in profile.sorted_entries().into_iter().zip(entry_reports(profile)) {
        let trips: Vec<String> = entry.trips.iter().map(describe_trip).collect();
        let meals: Vec<String> = entry.meals.iter().map(describe_meal).collect();

        let row = [
            entry.date.to_string(),
            kg(report.footprint.transport_kg),
            kg(report.footprint.food_kg),
            kg(report.footprint.electricity_kg),
            kg(report.footprint.total_kg),
            kg(report.baseline_kg),
            kg(report.savings_kg),
            entry.region.as_str().to_string(),
            entry.household_size.to_string(),
            entry.electricity_level.as_str().to_string(),
            entry.refill_count.to_string(),
            entry.nature_minutes.to_string(),
            trips.join(" | "),
            meals.join(" | "),
            entry.notes.clone().unwrap_or_default(),
        ];
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row for {}", entry.date))?;
        rows += 1;
    }

    let out = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV")?;

    tracing::debug!(profile_id = %profile.id, rows, "Exported CSV");
    Ok(out)
}

/// The profile's history as a CSV string.
pub fn export_csv(profile: &Profile) -> Result<String> {
    let bytes = write_csv(profile, Vec::new())?;
    Ok(String::from_utf8(bytes).context("CSV output is not UTF-8")?)
}

/// Suggested file name for a profile's CSV export.
pub fn export_filename(profile: &Profile) -> String {
    format!("{}_co2_log.csv", profile.name.replace(' ', "_"))
}

/// One point of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub kg: f64,
}

/// Daily totals for the last `TREND_DAYS` days ending at `today`, oldest
/// first. Days with no entry show zero.
pub fn weekly_trend(profile: &Profile, today: NaiveDate) -> Vec<TrendPoint> {
    let totals: HashMap<NaiveDate, f64> = profile
        .entries
        .iter()
        .map(|e| (e.date, footprint::total_kg(e)))
        .collect();

    (0..TREND_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| TrendPoint {
            date,
            kg: totals.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}
