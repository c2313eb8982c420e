// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! "What this means": kilograms of CO2e as everyday equivalents.
//!
//! These are rough intuition builders, not accounting figures.
//! `round_nice` is for display only; never store or compare its output.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Region;
use crate::services::factors;

/// Average passenger car, ~400 g CO2 per mile.
pub const CAR_KG_PER_KM: f64 = 0.4 / 1.60934;

/// Streaming video, ~36 g CO2 per hour.
pub const STREAMING_KG_PER_HOUR: f64 = 0.036;

/// Annual CO2 uptake range for one tree.
pub const TREE_SLOW_KG_PER_YEAR: f64 = 10.0;
pub const TREE_FAST_KG_PER_YEAR: f64 = 40.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Typical smartphone battery, ~15 Wh.
pub const PHONE_CHARGE_KWH: f64 = 0.015;

/// Savings at or below this are not worth explaining.
pub const MEANINGFUL_SAVINGS_KG: f64 = 0.0001;

/// A kilogram figure expressed in everyday units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Equivalents {
    pub driving_km: f64,
    pub streaming_hours: f64,
    /// Days for one tree to absorb the CO2, at the fast uptake rate
    pub tree_days_low: f64,
    /// Days for one tree to absorb the CO2, at the slow uptake rate
    pub tree_days_high: f64,
    pub phone_charges: f64,
}

impl Equivalents {
    /// The same figures passed through `round_nice`.
    pub fn rounded(&self) -> Self {
        Self {
            driving_km: round_nice(self.driving_km),
            streaming_hours: round_nice(self.streaming_hours),
            tree_days_low: round_nice(self.tree_days_low),
            tree_days_high: round_nice(self.tree_days_high),
            phone_charges: round_nice(self.phone_charges),
        }
    }
}

/// Negative or non-finite kilograms are treated as zero.
fn sanitize_kg(kg: f64) -> f64 {
    if kg.is_finite() {
        kg.max(0.0)
    } else {
        0.0
    }
}

/// `kg / divisor`, or zero when the divisor is unusable.
fn ratio(kg: f64, divisor: f64) -> f64 {
    if divisor.is_finite() && divisor > 0.0 {
        kg / divisor
    } else {
        0.0
    }
}

/// Phone charges for `kg` on a grid of the given intensity (kg/kWh).
pub fn phone_charges(kg: f64, grid_kg_per_kwh: f64) -> f64 {
    ratio(sanitize_kg(kg), PHONE_CHARGE_KWH * grid_kg_per_kwh)
}

/// Convert `kg` into everyday units for `region`'s grid.
pub fn equivalents(kg: f64, region: Region) -> Equivalents {
    let kg = sanitize_kg(kg);
    Equivalents {
        driving_km: ratio(kg, CAR_KG_PER_KM),
        streaming_hours: ratio(kg, STREAMING_KG_PER_HOUR),
        // The faster uptake rate gives the smaller day count.
        tree_days_low: ratio(kg, TREE_FAST_KG_PER_YEAR / DAYS_PER_YEAR),
        tree_days_high: ratio(kg, TREE_SLOW_KG_PER_YEAR / DAYS_PER_YEAR),
        phone_charges: phone_charges(kg, factors::grid_kg_per_kwh(region)),
    }
}

/// Round for display: one decimal under 1, whole numbers under 10,
/// otherwise the nearest multiple of 5.
pub fn round_nice(n: f64) -> f64 {
    if !n.is_finite() {
        return 0.0;
    }
    if n < 1.0 {
        (n * 10.0).round() / 10.0
    } else if n < 10.0 {
        n.round()
    } else {
        (n / 5.0).round() * 5.0
    }
}

/// Equivalents for a day's total and, when positive, its savings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MeaningCard {
    pub region: Region,
    pub total: Equivalents,
    pub saved: Option<Equivalents>,
}

pub fn meaning_card(total_kg: f64, savings_kg: f64, region: Region) -> MeaningCard {
    MeaningCard {
        region,
        total: equivalents(total_kg, region),
        saved: (savings_kg > MEANINGFUL_SAVINGS_KG).then(|| equivalents(savings_kg, region)),
    }
}
