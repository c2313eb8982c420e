// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Badges and the logging streak, derived from a profile's full history.
//!
//! Two different "streaks" live here and must not be confused:
//! - the veg streak counts consecutive *entries* (in date order, gaps
//!   between dates are irrelevant);
//! - the logging streak counts consecutive *calendar days* ending today.

use chrono::{Days, NaiveDate};
use std::collections::{BTreeSet, HashSet};

use crate::models::{Badge, Entry, Profile, TransportMode};
use crate::services::footprint;

/// Consecutive plant-based entries needed for the veg-streak badge.
pub const VEG_STREAK_RUN: usize = 3;

/// Entries needed for the seven-logs badge.
pub const SEVEN_LOGS: usize = 7;

/// Entries at or under goal needed for the goal-hitter badge.
pub const GOAL_HITTER_DAYS: usize = 5;

/// How far back the logging streak looks.
pub const STREAK_LOOKBACK_DAYS: u64 = 365;

/// Whether `entries` (sorted by date) contain a run of at least `run`
/// consecutive entries with a vegetarian/vegan meal.
pub fn has_veg_run(entries: &[&Entry], run: usize) -> bool {
    let mut current = 0;
    for entry in entries {
        current = if entry.has_plant_based_meal() {
            current + 1
        } else {
            0
        };
        if current >= run {
            return true;
        }
    }
    false
}

/// Number of entries whose total is at or under `goal_kg`.
pub fn goal_days(entries: &[&Entry], goal_kg: f64) -> usize {
    entries
        .iter()
        .filter(|e| footprint::total_kg(e) <= goal_kg)
        .count()
}

/// Badges the history qualifies for right now, ignoring anything earned before.
pub fn qualifying_badges(profile: &Profile) -> BTreeSet<Badge> {
    let entries = profile.sorted_entries();
    let mut badges = BTreeSet::new();

    if !entries.is_empty() {
        badges.insert(Badge::FirstLog);
    }
    if entries.len() >= SEVEN_LOGS {
        badges.insert(Badge::SevenLogs);
    }
    if entries.iter().any(|e| e.used_mode(TransportMode::Bike)) {
        badges.insert(Badge::BikeDay);
    }
    if has_veg_run(&entries, VEG_STREAK_RUN) {
        badges.insert(Badge::VegStreak);
    }
    if goal_days(&entries, profile.daily_goal_kg) >= GOAL_HITTER_DAYS {
        badges.insert(Badge::GoalHitter);
    }

    badges
}

/// Previously earned badges plus anything the history now qualifies for.
///
/// Never drops a badge.
pub fn compute_badges(profile: &Profile) -> BTreeSet<Badge> {
    let mut badges = profile.badges.clone();
    badges.extend(qualifying_badges(profile));
    badges
}

/// Consecutive calendar days with an entry, walking back from `today`.
///
/// Stops at the first day with no entry, or after `STREAK_LOOKBACK_DAYS`.
pub fn logging_streak(entries: &[Entry], today: NaiveDate) -> u32 {
    let logged: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if !logged.contains(&day) {
            break;
        }
        streak += 1;
    }
    streak
}
