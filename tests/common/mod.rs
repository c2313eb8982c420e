// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use campus_co2::models::{Entry, Meal, MealType, TransportMode, Trip};
use campus_co2::store::MemoryStore;
use campus_co2::ProfileTracker;
use chrono::NaiveDate;

/// Build a date, panicking on invalid input (test helper).
#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A tracker over a fresh in-memory store, plus a handle to that store.
#[allow(dead_code)]
pub fn test_tracker() -> (ProfileTracker<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let tracker = ProfileTracker::open(store.clone()).expect("empty store opens");
    (tracker, store)
}

/// A tracker with one profile already created; returns its id.
#[allow(dead_code)]
pub fn tracker_with_profile(name: &str) -> (ProfileTracker<MemoryStore>, MemoryStore, String) {
    let (mut tracker, store) = test_tracker();
    let id = tracker
        .create_profile(name)
        .expect("profile created")
        .id
        .clone();
    (tracker, store, id)
}

/// A day that completes every mission (170 points).
#[allow(dead_code)]
pub fn perfect_day(date: NaiveDate) -> Entry {
    Entry::new(date)
        .with_trip(Trip::new("Ride to campus", 6.0, TransportMode::Bike))
        .with_meal(Meal::new("Lunch", MealType::Vegetarian))
        .with_habits(3, 20)
}

/// A day that completes only the bus-related missions.
#[allow(dead_code)]
pub fn bus_day(date: NaiveDate) -> Entry {
    Entry::new(date)
        .with_trip(Trip::new("Bus", 10.0, TransportMode::Bus))
        .with_meal(Meal::new("Lunch", MealType::Mixed))
}

/// A heavy day: solo car plus a meat-heavy meal.
#[allow(dead_code)]
pub fn car_day(date: NaiveDate) -> Entry {
    Entry::new(date)
        .with_trip(Trip::new("Drive", 40.0, TransportMode::Car))
        .with_meal(Meal::new("Dinner", MealType::MeatHeavy))
}
