// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily log entry model for storage and calculations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::lenient;

/// How a trip was made.
///
/// Unrecognized modes in stored data decode to `Unknown`, which has no
/// emission factor and never satisfies a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walk,
    Bike,
    Bus,
    Lrt,
    Rideshare,
    Car,
    Ev,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransportMode {
    pub const ALL: [TransportMode; 7] = [
        TransportMode::Walk,
        TransportMode::Bike,
        TransportMode::Bus,
        TransportMode::Lrt,
        TransportMode::Rideshare,
        TransportMode::Car,
        TransportMode::Ev,
    ];

    /// Modes whose emissions are split between the people on board.
    pub fn is_shared_vehicle(self) -> bool {
        matches!(self, TransportMode::Car | TransportMode::Rideshare)
    }

    /// Human-powered modes.
    pub fn is_active(self) -> bool {
        matches!(self, TransportMode::Walk | TransportMode::Bike)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Walk => "walk",
            TransportMode::Bike => "bike",
            TransportMode::Bus => "bus",
            TransportMode::Lrt => "lrt",
            TransportMode::Rideshare => "rideshare",
            TransportMode::Car => "car",
            TransportMode::Ev => "ev",
            TransportMode::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransportMode::Walk => "Walk",
            TransportMode::Bike => "Bike",
            TransportMode::Bus => "Bus",
            TransportMode::Lrt => "LRT",
            TransportMode::Rideshare => "Rideshare",
            TransportMode::Car => "Car",
            TransportMode::Ev => "EV",
            TransportMode::Unknown => "Unknown",
        }
    }
}

/// Rough composition of a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    MeatHeavy,
    Mixed,
    Vegetarian,
    Vegan,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::MeatHeavy,
        MealType::Mixed,
        MealType::Vegetarian,
        MealType::Vegan,
    ];

    /// Vegetarian or vegan.
    pub fn is_plant_based(self) -> bool {
        matches!(self, MealType::Vegetarian | MealType::Vegan)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::MeatHeavy => "meat_heavy",
            MealType::Mixed => "mixed",
            MealType::Vegetarian => "vegetarian",
            MealType::Vegan => "vegan",
            MealType::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealType::MeatHeavy => "Meat-heavy",
            MealType::Mixed => "Mixed",
            MealType::Vegetarian => "Vegetarian",
            MealType::Vegan => "Vegan",
            MealType::Unknown => "Unknown",
        }
    }
}

/// Electricity grid region (Canadian province).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Region {
    #[default]
    #[serde(rename = "AB")]
    Alberta,
    #[serde(rename = "SK")]
    Saskatchewan,
    #[serde(rename = "BC")]
    BritishColumbia,
    #[serde(other)]
    Unknown,
}

impl Region {
    pub const ALL: [Region; 3] = [
        Region::Alberta,
        Region::Saskatchewan,
        Region::BritishColumbia,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Alberta => "AB",
            Region::Saskatchewan => "SK",
            Region::BritishColumbia => "BC",
            Region::Unknown => "??",
        }
    }
}

/// How heavily the household uses electricity relative to typical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Low,
    #[default]
    Average,
    High,
}

impl UsageLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageLevel::Low => "low",
            UsageLevel::Average => "average",
            UsageLevel::High => "high",
        }
    }
}

macro_rules! impl_display_from_str {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseEnumError {
                        kind: $what,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_display_from_str!(TransportMode, "transport mode", [
    TransportMode::Walk,
    TransportMode::Bike,
    TransportMode::Bus,
    TransportMode::Lrt,
    TransportMode::Rideshare,
    TransportMode::Car,
    TransportMode::Ev,
]);
impl_display_from_str!(MealType, "meal type", [
    MealType::MeatHeavy,
    MealType::Mixed,
    MealType::Vegetarian,
    MealType::Vegan,
]);
impl_display_from_str!(Region, "region", [
    Region::Alberta,
    Region::Saskatchewan,
    Region::BritishColumbia,
]);
impl_display_from_str!(UsageLevel, "electricity level", [
    UsageLevel::Low,
    UsageLevel::Average,
    UsageLevel::High,
]);

/// Error parsing one of the enumerations from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// One leg of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default)]
    pub label: String,
    /// Distance in kilometres
    #[serde(
        default,
        alias = "km",
        alias = "distance_km",
        deserialize_with = "lenient::number"
    )]
    pub distance_km: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub mode: TransportMode,
    /// People in the vehicle (only meaningful for car/rideshare)
    #[serde(
        default,
        alias = "carOccupancy",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_number"
    )]
    pub occupancy: Option<f64>,
}

impl Trip {
    pub fn new(label: impl Into<String>, distance_km: f64, mode: TransportMode) -> Self {
        Self {
            label: label.into(),
            distance_km,
            mode,
            occupancy: None,
        }
    }

    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = Some(occupancy);
        self
    }
}

/// One meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    pub meal_type: MealType,
}

impl Meal {
    pub fn new(label: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            label: label.into(),
            meal_type,
        }
    }
}

fn default_household_size() -> u32 {
    1
}

/// One calendar day of logged activity.
///
/// A profile holds at most one entry per `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque identifier, regenerated on every save
    #[serde(default)]
    pub id: String,
    #[serde(alias = "dateISO")]
    pub date: NaiveDate,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub meals: Vec<Meal>,

    // ─── Electricity Estimate ────────────────────────────────────
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub include_electricity: bool,
    #[serde(default, alias = "province", deserialize_with = "lenient::or_default")]
    pub region: Region,
    #[serde(
        default = "default_household_size",
        deserialize_with = "lenient::household_size"
    )]
    pub household_size: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub electricity_level: UsageLevel,

    // ─── Habits (points only) ────────────────────────────────────
    #[serde(default, alias = "refills", deserialize_with = "lenient::count")]
    pub refill_count: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub nature_minutes: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    /// An empty entry for `date`: no trips, no meals, electricity off.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            date,
            trips: Vec::new(),
            meals: Vec::new(),
            include_electricity: false,
            region: Region::default(),
            household_size: 1,
            electricity_level: UsageLevel::default(),
            refill_count: 0,
            nature_minutes: 0,
            notes: None,
        }
    }

    pub fn with_trip(mut self, trip: Trip) -> Self {
        self.trips.push(trip);
        self
    }

    pub fn with_meal(mut self, meal: Meal) -> Self {
        self.meals.push(meal);
        self
    }

    pub fn with_electricity(
        mut self,
        region: Region,
        household_size: u32,
        level: UsageLevel,
    ) -> Self {
        self.include_electricity = true;
        self.region = region;
        self.household_size = household_size;
        self.electricity_level = level;
        self
    }

    pub fn with_habits(mut self, refill_count: u32, nature_minutes: u32) -> Self {
        self.refill_count = refill_count;
        self.nature_minutes = nature_minutes;
        self
    }

    /// Whether any meal today was vegetarian or vegan.
    pub fn has_plant_based_meal(&self) -> bool {
        self.meals.iter().any(|m| m.meal_type.is_plant_based())
    }

    /// Whether any trip used the given mode.
    pub fn used_mode(&self, mode: TransportMode) -> bool {
        self.trips.iter().any(|t| t.mode == mode)
    }
}
