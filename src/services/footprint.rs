// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily footprint calculations.
//!
//! Every function here is pure and total: malformed numbers fall back to
//! defaults, out-of-range values are clamped, and the result is always a
//! finite, non-negative number of kilograms CO2e.

use dashmap::DashMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{BaselineHabits, Entry, TransportMode, Trip};
use crate::services::factors::{
    self, DAYS_PER_MONTH, MAX_HOUSEHOLD, MAX_OCCUPANCY, MIN_HOUSEHOLD, MIN_OCCUPANCY,
};

/// Replace a non-finite number with `fallback`.
pub fn safe_number(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Vehicle occupancy clamped to [1, 6]; unset or garbage means driving alone.
pub fn clamp_occupancy(occupancy: Option<f64>) -> f64 {
    safe_number(occupancy.unwrap_or(MIN_OCCUPANCY), MIN_OCCUPANCY)
        .clamp(MIN_OCCUPANCY, MAX_OCCUPANCY)
}

/// Household size clamped to [1, 12].
pub fn clamp_household(size: u32) -> f64 {
    f64::from(size).clamp(MIN_HOUSEHOLD, MAX_HOUSEHOLD)
}

/// Non-negative distance; garbage counts as not travelled.
fn trip_distance(trip: &Trip) -> f64 {
    safe_number(trip.distance_km, 0.0).max(0.0)
}

/// Emissions for `km` kilometres by `mode`, split across the occupants of
/// shared vehicles.
fn distance_kg(mode: TransportMode, km: f64, occupancy: Option<f64>) -> f64 {
    let base = factors::transport_kg_per_km(mode) * km;
    if mode.is_shared_vehicle() {
        base / clamp_occupancy(occupancy)
    } else {
        base
    }
}

/// Emissions for one trip.
pub fn trip_kg(trip: &Trip) -> f64 {
    distance_kg(trip.mode, trip_distance(trip), trip.occupancy)
}

/// Total distance logged across all trips.
pub fn total_km(entry: &Entry) -> f64 {
    entry.trips.iter().map(trip_distance).sum()
}

pub fn transport_kg(entry: &Entry) -> f64 {
    entry.trips.iter().map(trip_kg).sum()
}

pub fn food_kg(entry: &Entry) -> f64 {
    entry
        .meals
        .iter()
        .map(|m| factors::food_kg_per_meal(m.meal_type))
        .sum()
}

/// Per-person daily share of typical household electricity.
pub fn electricity_kg(entry: &Entry) -> f64 {
    if !entry.include_electricity {
        return 0.0;
    }

    let kwh_per_month = factors::typical_kwh_per_month(entry.region)
        * factors::usage_multiplier(entry.electricity_level);
    let kwh_per_person_per_day =
        kwh_per_month / DAYS_PER_MONTH / clamp_household(entry.household_size);

    kwh_per_person_per_day * factors::grid_kg_per_kwh(entry.region)
}

pub fn total_kg(entry: &Entry) -> f64 {
    transport_kg(entry) + food_kg(entry) + electricity_kg(entry)
}

/// Emissions for the same day had the user stuck to their baseline habits.
///
/// Distance and meal count come from the entry; electricity is counted
/// exactly as logged.
pub fn baseline_kg(habits: &BaselineHabits, entry: &Entry) -> f64 {
    let transport = distance_kg(habits.mode, total_km(entry), Some(habits.occupancy));
    let food = factors::food_kg_per_meal(habits.meal_type) * entry.meals.len() as f64;
    transport + food + electricity_kg(entry)
}

/// Baseline minus actual. Negative when the day was worse than baseline.
pub fn savings_kg(habits: &BaselineHabits, entry: &Entry) -> f64 {
    baseline_kg(habits, entry) - total_kg(entry)
}

/// Per-category breakdown of one day's emissions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    pub transport_kg: f64,
    pub food_kg: f64,
    pub electricity_kg: f64,
    pub total_kg: f64,
}

impl Footprint {
    pub fn of(entry: &Entry) -> Self {
        let transport_kg = transport_kg(entry);
        let food_kg = food_kg(entry);
        let electricity_kg = electricity_kg(entry);
        Self {
            transport_kg,
            food_kg,
            electricity_kg,
            total_kg: transport_kg + food_kg + electricity_kg,
        }
    }
}

/// Stable content hash of the fields that affect a footprint.
///
/// The entry `id`, notes, and habit counters are excluded, so re-saving
/// an identical day hits the same key.
pub fn content_key(entry: &Entry) -> Option<String> {
    let content = (
        &entry.trips,
        &entry.meals,
        entry.include_electricity,
        entry.region,
        entry.household_size,
        entry.electricity_level,
    );
    let bytes = serde_json::to_vec(&content).ok()?;
    Some(hex::encode(Sha256::digest(&bytes)))
}

/// Entries kept by a default `FootprintCache` before it starts over.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Memoizes footprints by entry content.
///
/// Holds at most `capacity` footprints. When full, the whole map is
/// dropped before the next insert; footprints are cheap to recompute.
#[derive(Debug)]
pub struct FootprintCache {
    computed: DashMap<String, Footprint>,
    capacity: usize,
}

impl Default for FootprintCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl FootprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` footprints (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            computed: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn footprint(&self, entry: &Entry) -> Footprint {
        let Some(key) = content_key(entry) else {
            return Footprint::of(entry);
        };

        if let Some(hit) = self.computed.get(&key) {
            tracing::trace!(date = %entry.date, "Footprint cache hit");
            return *hit;
        }

        let footprint = Footprint::of(entry);
        if self.computed.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "Footprint cache full, clearing");
            self.computed.clear();
        }
        self.computed.insert(key, footprint);
        footprint
    }

    pub fn len(&self) -> usize {
        self.computed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computed.is_empty()
    }

    pub fn clear(&self) {
        self.computed.clear();
    }
}
