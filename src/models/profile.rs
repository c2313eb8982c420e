// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local user profile: identity, baseline habits, and logged history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::entry::{Entry, MealType, TransportMode};
use super::lenient;

/// Default daily emissions target for new profiles (kg CO2e).
pub const DEFAULT_DAILY_GOAL_KG: f64 = 6.0;

/// Name given to profiles created with a blank name.
pub const DEFAULT_PROFILE_NAME: &str = "New User";

/// Achievement unlocked by a profile's history. Never revoked once earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    FirstLog,
    SevenLogs,
    BikeDay,
    VegStreak,
    GoalHitter,
}

impl Badge {
    pub fn id(self) -> &'static str {
        match self {
            Badge::FirstLog => "first-log",
            Badge::SevenLogs => "seven-logs",
            Badge::BikeDay => "bike-day",
            Badge::VegStreak => "veg-streak",
            Badge::GoalHitter => "goal-hitter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::FirstLog => "✅ First log",
            Badge::SevenLogs => "📅 7 logs",
            Badge::BikeDay => "🚲 Bike day",
            Badge::VegStreak => "🥗 Veg streak (3+)",
            Badge::GoalHitter => "🎯 Goal hitter (5 days)",
        }
    }
}

/// The counterfactual habits used to compute savings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineHabits {
    pub mode: TransportMode,
    /// People in the vehicle when `mode` is car/rideshare
    pub occupancy: f64,
    pub meal_type: MealType,
}

fn default_baseline_mode() -> TransportMode {
    TransportMode::Car
}

fn default_baseline_meal() -> MealType {
    MealType::Mixed
}

fn default_occupancy() -> f64 {
    1.0
}

fn default_goal() -> f64 {
    DEFAULT_DAILY_GOAL_KG
}

fn default_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

/// A stored goal; garbage or a negative value means the default goal.
fn lenient_goal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::optional_number(deserializer)?
        .filter(|goal| *goal >= 0.0)
        .unwrap_or(DEFAULT_DAILY_GOAL_KG))
}

/// One local user identity with settings and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    /// Creation timestamp (RFC 3339)
    #[serde(default)]
    pub created_at: String,

    // ─── Baseline ────────────────────────────────────────────────
    #[serde(default = "default_baseline_mode")]
    pub baseline_mode: TransportMode,
    #[serde(
        default = "default_occupancy",
        alias = "baselineCarOccupancy",
        deserialize_with = "lenient::number"
    )]
    pub baseline_occupancy: f64,
    #[serde(default = "default_baseline_meal", alias = "baselineMeal")]
    pub baseline_meal_type: MealType,
    #[serde(
        default = "default_goal",
        alias = "dailyCO2GoalKg",
        deserialize_with = "lenient_goal"
    )]
    pub daily_goal_kg: f64,

    // ─── History ─────────────────────────────────────────────────
    /// Logged days, at most one per date
    #[serde(default, deserialize_with = "lenient::valid_items")]
    pub entries: Vec<Entry>,

    // ─── Gamification ────────────────────────────────────────────
    #[serde(default)]
    pub points: u64,
    #[serde(default, deserialize_with = "lenient::known_set")]
    pub badges: BTreeSet<Badge>,
}

impl Profile {
    /// A fresh profile with the standard baseline (solo car, mixed meals).
    pub fn new(id: String, name: &str, created_at: String) -> Self {
        let name = name.trim();
        Self {
            id,
            name: if name.is_empty() {
                DEFAULT_PROFILE_NAME.to_string()
            } else {
                name.to_string()
            },
            created_at,
            baseline_mode: default_baseline_mode(),
            baseline_occupancy: default_occupancy(),
            baseline_meal_type: default_baseline_meal(),
            daily_goal_kg: DEFAULT_DAILY_GOAL_KG,
            entries: Vec::new(),
            points: 0,
            badges: BTreeSet::new(),
        }
    }

    pub fn baseline_habits(&self) -> BaselineHabits {
        BaselineHabits {
            mode: self.baseline_mode,
            occupancy: self.baseline_occupancy,
            meal_type: self.baseline_meal_type,
        }
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Insert `entry`, replacing any existing entry for the same date.
    ///
    /// Returns `true` if the date was not logged before.
    pub fn upsert_entry(&mut self, entry: Entry) -> bool {
        match self.entries.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => {
                *existing = entry;
                false
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }

    /// Entries ordered by date, oldest first.
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.date);
        entries
    }
}

/// Partial update to a profile's editable settings.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    #[validate(length(min = 1, max = 60))]
    pub name: Option<String>,
    pub baseline_mode: Option<TransportMode>,
    #[validate(range(min = 1.0, max = 6.0))]
    pub baseline_occupancy: Option<f64>,
    pub baseline_meal_type: Option<MealType>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub daily_goal_kg: Option<f64>,
}

impl ProfileSettings {
    /// Whether every numeric field present is a finite number.
    ///
    /// Range validation alone lets NaN through.
    pub fn numbers_are_finite(&self) -> bool {
        [self.baseline_occupancy, self.daily_goal_kg]
            .into_iter()
            .flatten()
            .all(f64::is_finite)
    }

    /// Apply the present fields to `profile`.
    pub fn apply_to(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            let name = name.trim();
            profile.name = if name.is_empty() {
                DEFAULT_PROFILE_NAME.to_string()
            } else {
                name.to_string()
            };
        }
        if let Some(mode) = self.baseline_mode {
            profile.baseline_mode = mode;
        }
        if let Some(occupancy) = self.baseline_occupancy {
            profile.baseline_occupancy = occupancy;
        }
        if let Some(meal) = self.baseline_meal_type {
            profile.baseline_meal_type = meal;
        }
        if let Some(goal) = self.daily_goal_kg {
            profile.daily_goal_kg = goal;
        }
    }
}
