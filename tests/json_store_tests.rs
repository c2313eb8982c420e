// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed store tests, including data written by older clients.

mod common;

use campus_co2::models::{Badge, MealType, Region, TransportMode, UsageLevel};
use campus_co2::services::footprint;
use campus_co2::store::{keys, JsonFileStore, ProfileStore};
use campus_co2::ProfileTracker;
use common::{date, perfect_day};
use std::fs;
use tempfile::TempDir;

const LEGACY_PROFILES: &str = r#"[
  {
    "id": "p_legacy",
    "name": "Legacy",
    "createdAt": "2024-01-01T00:00:00Z",
    "baselineMode": "car",
    "baselineCarOccupancy": "2",
    "baselineMeal": "meat_heavy",
    "dailyCO2GoalKg": 5,
    "points": 120,
    "badges": ["first-log", "hover-board"],
    "entries": [
      {
        "id": "e1",
        "dateISO": "2024-02-01",
        "trips": [
          { "label": "Drive", "km": "12", "mode": "car", "carOccupancy": 2 },
          { "label": "Broken", "distance_km": "abc", "mode": "bike" },
          { "label": "Teleport", "km": 5, "mode": "teleporter" }
        ],
        "meals": [
          { "label": "Lunch", "type": "vegan" },
          { "label": "Mystery", "type": "space_food" }
        ],
        "includeElectricity": true,
        "province": "BC",
        "householdSize": "x",
        "electricityLevel": "high",
        "refills": "3",
        "natureMinutes": null
      }
    ]
  }
]"#;

fn open_store(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::open(dir.path().join("store")).unwrap()
}

#[test]
fn test_round_trip_through_files() {
    let dir = TempDir::new().unwrap();

    let id = {
        let mut tracker = ProfileTracker::open(open_store(&dir)).unwrap();
        let id = tracker.create_profile("Alex").unwrap().id.clone();
        tracker.save_entry(&id, perfect_day(date(2024, 3, 4))).unwrap();
        id
    };

    let tracker = ProfileTracker::open(open_store(&dir)).unwrap();
    assert_eq!(tracker.active_id(), Some(id.as_str()));

    let profile = tracker.profile(&id).unwrap();
    assert_eq!(profile.points, 170);
    assert_eq!(profile.entries.len(), 1);
    assert!(profile.badges.contains(&Badge::BikeDay));
    assert_eq!(profile.entries[0].date, date(2024, 3, 4));
}

#[test]
fn test_missing_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    assert!(store.load_profiles().unwrap().is_empty());
    assert_eq!(store.load_active_profile_id().unwrap(), None);
    // Removing a key that was never written is fine
    store.remove_item(keys::ACTIVE_PROFILE).unwrap();
}

#[test]
fn test_corrupt_profiles_load_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.set_item(keys::PROFILES, "{not json").unwrap();

    let tracker = ProfileTracker::open(store).unwrap();
    assert!(tracker.profiles().is_empty());
    assert_eq!(tracker.active_id(), None);
}

#[test]
fn test_one_bad_record_does_not_cost_the_others() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store
        .set_item(
            keys::PROFILES,
            r#"[
              {"id": "good", "name": "Good", "points": 500,
               "entries": [{"date": "2024-03-01"}]},
              {"id": "other", "entries": [{"date": "2024-02-30"}, {"date": "2024-03-02"}]},
              {"name": "No id"},
              42
            ]"#,
        )
        .unwrap();

    {
        let mut tracker = ProfileTracker::open(open_store(&dir)).unwrap();
        assert_eq!(tracker.profiles().len(), 2);
        let other = tracker.profile("other").unwrap();
        assert_eq!(other.name, "New User");
        assert_eq!(other.entries.len(), 1);

        // A write after a partial load keeps every readable profile
        tracker.create_profile("New").unwrap();
    }

    let tracker = ProfileTracker::open(open_store(&dir)).unwrap();
    assert_eq!(tracker.profiles().len(), 3);
    let good = tracker.profile("good").unwrap();
    assert_eq!(good.points, 500);
    assert_eq!(good.entries[0].date, date(2024, 3, 1));
    assert_eq!(tracker.profile("other").unwrap().entries[0].date, date(2024, 3, 2));
}

#[test]
fn test_set_item_overwrites_atomically() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    store.set_item("k", "first").unwrap();
    store.set_item("k", "second").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("second"));

    // No temp files left behind
    let leftovers: Vec<_> = fs::read_dir(store.dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_legacy_profile_decodes_leniently() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.set_item(keys::PROFILES, LEGACY_PROFILES).unwrap();

    let tracker = ProfileTracker::open(store).unwrap();
    assert_eq!(tracker.active_id(), Some("p_legacy"));

    let profile = tracker.profile("p_legacy").unwrap();
    assert_eq!(profile.baseline_occupancy, 2.0);
    assert_eq!(profile.baseline_meal_type, MealType::MeatHeavy);
    assert_eq!(profile.daily_goal_kg, 5.0);
    assert_eq!(profile.badges.len(), 1);

    let entry = &profile.entries[0];
    assert_eq!(entry.date, date(2024, 2, 1));
    assert_eq!(entry.trips[0].distance_km, 12.0);
    assert_eq!(entry.trips[1].distance_km, 0.0);
    assert_eq!(entry.trips[2].mode, TransportMode::Unknown);
    assert_eq!(entry.meals[1].meal_type, MealType::Unknown);
    assert_eq!(entry.region, Region::BritishColumbia);
    assert_eq!(entry.household_size, 1);
    assert_eq!(entry.electricity_level, UsageLevel::High);
    assert_eq!(entry.refill_count, 3);
    assert_eq!(entry.nature_minutes, 0);

    // Car 12 km / 2 = 1.2 kg, unknown mode adds nothing
    assert!((footprint::transport_kg(entry) - 1.2).abs() < 1e-9);
    // Vegan 0.9, unknown meal adds nothing
    assert!((footprint::food_kg(entry) - 0.9).abs() < 1e-9);
    // 675 kWh/month * 1.25 / 30.4 * 0.014 kg/kWh for one person
    let expected = 675.0 * 1.25 / 30.4 * 0.014;
    assert!((footprint::electricity_kg(entry) - expected).abs() < 1e-9);
}
