// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily missions: fixed behavioural rules that award points.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Entry;
use crate::services::footprint;

/// Transport emissions below this count as a low-transport day.
pub const LOW_TRANSPORT_KG: f64 = 1.0;

/// Points available if every mission is completed.
pub const MAX_DAILY_POINTS: u32 = 170;

/// The mission catalogue, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "kebab-case")]
pub enum MissionId {
    MoveLowCarbon,
    NoCar,
    VegMeal,
    Refill,
    NatureReset,
    LowTransport,
}

impl MissionId {
    pub const ALL: [MissionId; 6] = [
        MissionId::MoveLowCarbon,
        MissionId::NoCar,
        MissionId::VegMeal,
        MissionId::Refill,
        MissionId::NatureReset,
        MissionId::LowTransport,
    ];

    pub fn points(self) -> u32 {
        match self {
            MissionId::MoveLowCarbon => 50,
            MissionId::NoCar => 40,
            MissionId::VegMeal => 30,
            MissionId::Refill => 15,
            MissionId::NatureReset => 15,
            MissionId::LowTransport => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MissionId::MoveLowCarbon => "Move low-carbon (walk/bike today)",
            MissionId::NoCar => "No car/rideshare today",
            MissionId::VegMeal => "Choose at least 1 vegetarian/vegan meal",
            MissionId::Refill => "Refill your bottle 2+ times",
            MissionId::NatureReset => "Nature reset (10+ minutes)",
            MissionId::LowTransport => "Keep transport emissions low (< 1.0 kg)",
        }
    }

    /// Whether `entry` satisfies this mission.
    pub fn is_done(self, entry: &Entry) -> bool {
        match self {
            MissionId::MoveLowCarbon => entry.trips.iter().any(|t| t.mode.is_active()),
            MissionId::NoCar => {
                !entry.trips.is_empty() && !entry.trips.iter().any(|t| t.mode.is_shared_vehicle())
            }
            MissionId::VegMeal => entry.has_plant_based_meal(),
            MissionId::Refill => entry.refill_count >= 2,
            MissionId::NatureReset => entry.nature_minutes >= 10,
            MissionId::LowTransport => {
                !entry.trips.is_empty() && footprint::transport_kg(entry) < LOW_TRANSPORT_KG
            }
        }
    }
}

/// Outcome of one mission for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MissionResult {
    pub id: MissionId,
    pub label: String,
    pub done: bool,
    pub points: u32,
}

/// Evaluate every mission against `entry`, in catalogue order.
pub fn evaluate_missions(entry: &Entry) -> Vec<MissionResult> {
    MissionId::ALL
        .into_iter()
        .map(|id| MissionResult {
            id,
            label: id.label().to_string(),
            done: id.is_done(entry),
            points: id.points(),
        })
        .collect()
}

/// Sum of points for completed missions.
pub fn mission_points(results: &[MissionResult]) -> u32 {
    results.iter().filter(|m| m.done).map(|m| m.points).sum()
}
