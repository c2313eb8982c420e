// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factors (simplified educational defaults).
//!
//! These are intentionally rough constants, not a scientific model.
//! Unknown enum values map to zero so they never inflate a total.

use crate::models::{MealType, Region, TransportMode, UsageLevel};

/// Average days per month used to turn monthly kWh into daily kWh.
pub const DAYS_PER_MONTH: f64 = 30.4;

/// Valid range for people sharing a car or rideshare.
pub const MIN_OCCUPANCY: f64 = 1.0;
pub const MAX_OCCUPANCY: f64 = 6.0;

/// Valid range for household size when splitting electricity.
pub const MIN_HOUSEHOLD: f64 = 1.0;
pub const MAX_HOUSEHOLD: f64 = 12.0;

/// kg CO2e per km travelled.
pub fn transport_kg_per_km(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walk | TransportMode::Bike => 0.0,
        TransportMode::Bus => 0.08,
        TransportMode::Lrt => 0.03,
        TransportMode::Rideshare | TransportMode::Car => 0.2,
        TransportMode::Ev => 0.04,
        TransportMode::Unknown => 0.0,
    }
}

/// kg CO2e per meal.
pub fn food_kg_per_meal(meal: MealType) -> f64 {
    match meal {
        MealType::MeatHeavy => 3.3,
        MealType::Mixed => 2.0,
        MealType::Vegetarian => 1.2,
        MealType::Vegan => 0.9,
        MealType::Unknown => 0.0,
    }
}

/// Grid intensity in kg CO2e per kWh.
pub fn grid_kg_per_kwh(region: Region) -> f64 {
    match region {
        Region::Alberta => 0.47,
        Region::Saskatchewan => 0.63,
        Region::BritishColumbia => 0.014,
        Region::Unknown => 0.0,
    }
}

/// Typical household consumption in kWh per month.
pub fn typical_kwh_per_month(region: Region) -> f64 {
    match region {
        Region::Alberta => 600.0,
        Region::Saskatchewan => 625.0,
        Region::BritishColumbia => 675.0,
        Region::Unknown => 0.0,
    }
}

/// Scale applied to typical consumption.
pub fn usage_multiplier(level: UsageLevel) -> f64 {
    match level {
        UsageLevel::Low => 0.75,
        UsageLevel::Average => 1.0,
        UsageLevel::High => 1.25,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_factors_non_negative() {
        for mode in TransportMode::ALL {
            assert!(transport_kg_per_km(mode) >= 0.0, "{mode}");
        }
        for meal in MealType::ALL {
            assert!(food_kg_per_meal(meal) > 0.0, "{meal}");
        }
        for region in Region::ALL {
            assert!(grid_kg_per_kwh(region) > 0.0, "{region}");
            assert!(typical_kwh_per_month(region) > 0.0, "{region}");
        }
    }

    #[test]
    fn test_unknowns_are_zero() {
        assert_eq!(transport_kg_per_km(TransportMode::Unknown), 0.0);
        assert_eq!(food_kg_per_meal(MealType::Unknown), 0.0);
        assert_eq!(grid_kg_per_kwh(Region::Unknown), 0.0);
        assert_eq!(typical_kwh_per_month(Region::Unknown), 0.0);
    }

    #[test]
    fn test_active_modes_are_free() {
        assert_eq!(transport_kg_per_km(TransportMode::Walk), 0.0);
        assert_eq!(transport_kg_per_km(TransportMode::Bike), 0.0);
    }
}
