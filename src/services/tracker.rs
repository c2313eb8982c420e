// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile tracking service.
//!
//! Handles the core workflow for one save:
//! 1. Sanitize the submitted entry
//! 2. Compute footprint, baseline, missions, and equivalents
//! 3. Insert or replace the entry for its date
//! 4. Credit mission points (first save of a date only)
//! 5. Fold newly earned badges into the profile
//! 6. Persist the whole collection

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{Result, TrackerError};
use crate::models::{generate_id, Badge, Entry, Profile, ProfileSettings};
use crate::services::achievements;
use crate::services::equivalence::{self, MeaningCard};
use crate::services::factors::{MAX_HOUSEHOLD, MIN_HOUSEHOLD};
use crate::services::footprint::{self, Footprint, FootprintCache};
use crate::services::missions::{self, MissionResult};
use crate::store::ProfileStore;
use crate::time_utils::format_utc_rfc3339;

/// Longest single trip accepted on save (km).
pub const MAX_TRIP_KM: f64 = 500.0;
pub const MAX_REFILLS: u32 = 30;
pub const MAX_NATURE_MINUTES: u32 = 600;

/// Everything computed for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub footprint: Footprint,
    pub baseline_kg: f64,
    /// Baseline minus actual; negative when worse than baseline
    pub savings_kg: f64,
    pub missions: Vec<MissionResult>,
    pub mission_points: u32,
    pub meaning: MeaningCard,
}

/// Result of saving an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub summary: DaySummary,
    /// `false` when an existing entry for the date was replaced
    pub was_new_day: bool,
    pub points_awarded: u32,
    pub new_badges: Vec<Badge>,
}

/// Compute the day summary for `entry` against `profile`'s baseline.
pub fn summarize_day(profile: &Profile, entry: &Entry, footprint: Footprint) -> DaySummary {
    let baseline_kg = footprint::baseline_kg(&profile.baseline_habits(), entry);
    let savings_kg = baseline_kg - footprint.total_kg;
    let missions = missions::evaluate_missions(entry);
    let mission_points = missions::mission_points(&missions);

    DaySummary {
        date: entry.date,
        footprint,
        baseline_kg,
        savings_kg,
        meaning: equivalence::meaning_card(footprint.total_kg, savings_kg, entry.region),
        missions,
        mission_points,
    }
}

/// Clamp user input into the ranges the form allows and assign a fresh id.
pub fn sanitize_entry(mut entry: Entry) -> Entry {
    entry.id = generate_id("entry");

    for trip in &mut entry.trips {
        if trip.label.trim().is_empty() {
            trip.label = "Trip".to_string();
        } else {
            trip.label = trip.label.trim().to_string();
        }
        trip.distance_km = footprint::safe_number(trip.distance_km, 0.0).clamp(0.0, MAX_TRIP_KM);
        trip.occupancy = if trip.mode.is_shared_vehicle() {
            Some(footprint::clamp_occupancy(trip.occupancy))
        } else {
            None
        };
    }

    for meal in &mut entry.meals {
        if meal.label.trim().is_empty() {
            meal.label = "Meal".to_string();
        } else {
            meal.label = meal.label.trim().to_string();
        }
    }

    entry.household_size = entry
        .household_size
        .clamp(MIN_HOUSEHOLD as u32, MAX_HOUSEHOLD as u32);
    entry.refill_count = entry.refill_count.min(MAX_REFILLS);
    entry.nature_minutes = entry.nature_minutes.min(MAX_NATURE_MINUTES);
    entry
}

/// Owns the profile collection and keeps it in sync with the store.
pub struct ProfileTracker<S: ProfileStore> {
    store: S,
    profiles: Vec<Profile>,
    active_id: Option<String>,
    cache: FootprintCache,
}

impl<S: ProfileStore> ProfileTracker<S> {
    /// Load profiles and the active selection from `store`.
    ///
    /// If the remembered active profile no longer exists, the first
    /// profile becomes active.
    pub fn open(store: S) -> Result<Self> {
        let profiles = store.load_profiles()?;
        let remembered = store.load_active_profile_id()?;

        let active_id = match remembered {
            Some(id) if profiles.iter().any(|p| p.id == id) => Some(id),
            _ => {
                let first = profiles.first().map(|p| p.id.clone());
                if first.is_some() {
                    store.save_active_profile_id(first.as_deref())?;
                }
                first
            }
        };

        tracing::info!(
            profiles = profiles.len(),
            active = active_id.as_deref().unwrap_or("none"),
            "Profile tracker opened"
        );

        Ok(Self {
            store,
            profiles,
            active_id,
            cache: FootprintCache::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, id: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| TrackerError::ProfileNotFound(id.to_string()))
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| TrackerError::ProfileNotFound(id.to_string()))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_id.as_deref().and_then(|id| self.profile(id).ok())
    }

    /// The profile with `id`, or the active profile when `id` is `None`.
    pub fn resolve(&self, id: Option<&str>) -> Result<&Profile> {
        match id {
            Some(id) => self.profile(id),
            None => self.active_profile().ok_or(TrackerError::NoActiveProfile),
        }
    }

    pub fn set_active(&mut self, id: &str) -> Result<()> {
        self.index_of(id)?;
        self.store.save_active_profile_id(Some(id))?;
        self.active_id = Some(id.to_string());
        tracing::debug!(profile_id = id, "Active profile changed");
        Ok(())
    }

    /// Persist `next` and adopt it only if the write succeeded.
    fn commit(&mut self, next: Vec<Profile>) -> Result<()> {
        self.store.save_profiles(&next)?;
        self.profiles = next;
        Ok(())
    }

    /// Create a profile with default baseline settings and make it active.
    pub fn create_profile(&mut self, name: &str) -> Result<&Profile> {
        let profile = Profile::new(
            generate_id("profile"),
            name,
            format_utc_rfc3339(Utc::now()),
        );
        let id = profile.id.clone();

        let mut next = Vec::with_capacity(self.profiles.len() + 1);
        next.push(profile);
        next.extend(self.profiles.iter().cloned());
        self.commit(next)?;
        self.set_active(&id)?;

        tracing::info!(profile_id = %id, "Profile created");
        self.profile(&id)
    }

    /// Delete a profile and all its entries.
    pub fn delete_profile(&mut self, id: &str) -> Result<()> {
        let idx = self.index_of(id)?;
        let mut next = self.profiles.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.profiles.first().map(|p| p.id.clone());
            self.store.save_active_profile_id(self.active_id.as_deref())?;
        }

        tracing::info!(
            profile_id = id,
            entries = removed.entries.len(),
            "Profile deleted"
        );
        Ok(())
    }

    /// Apply validated changes to a profile's name, baseline, or goal.
    pub fn update_settings(&mut self, id: &str, settings: ProfileSettings) -> Result<&Profile> {
        settings.validate()?;
        if !settings.numbers_are_finite() {
            return Err(TrackerError::Validation(
                "numeric settings must be finite".to_string(),
            ));
        }

        let idx = self.index_of(id)?;
        let mut next = self.profiles.clone();
        settings.apply_to(&mut next[idx]);
        self.commit(next)?;

        tracing::info!(profile_id = id, "Profile settings updated");
        Ok(&self.profiles[idx])
    }

    /// Clear a profile's points. Badges are kept.
    pub fn reset_points(&mut self, id: &str) -> Result<()> {
        let idx = self.index_of(id)?;
        let mut next = self.profiles.clone();
        let previous = std::mem::take(&mut next[idx].points);
        self.commit(next)?;

        tracing::info!(profile_id = id, previous, "Points reset");
        Ok(())
    }

    /// Compute the summary for `entry` without saving it.
    pub fn preview(&self, id: &str, entry: &Entry) -> Result<DaySummary> {
        let profile = self.profile(id)?;
        Ok(summarize_day(profile, entry, self.cache.footprint(entry)))
    }

    /// Save `entry` for its date, replacing any existing entry.
    ///
    /// Mission points are credited only when the date is new, so
    /// re-saving a day never double-counts.
    pub fn save_entry(&mut self, id: &str, entry: Entry) -> Result<SaveOutcome> {
        let idx = self.index_of(id)?;
        let entry = sanitize_entry(entry);
        let summary = summarize_day(&self.profiles[idx], &entry, self.cache.footprint(&entry));
        let date = entry.date;

        let mut next = self.profiles.clone();
        let profile = &mut next[idx];
        let was_new_day = profile.upsert_entry(entry);
        let points_awarded = if was_new_day { summary.mission_points } else { 0 };
        profile.points += u64::from(points_awarded);

        let badges = achievements::compute_badges(profile);
        let new_badges: Vec<Badge> = badges.difference(&profile.badges).copied().collect();
        profile.badges = badges;

        self.commit(next)?;

        if was_new_day {
            tracing::info!(
                profile_id = id,
                %date,
                points = points_awarded,
                badges = ?new_badges,
                "Entry saved"
            );
        } else {
            tracing::debug!(profile_id = id, %date, "Entry replaced (no points awarded)");
        }

        Ok(SaveOutcome {
            summary,
            was_new_day,
            points_awarded,
            new_badges,
        })
    }

    /// Consecutive logged days ending at `today`.
    pub fn streak(&self, id: &str, today: NaiveDate) -> Result<u32> {
        Ok(achievements::logging_streak(&self.profile(id)?.entries, today))
    }
}
