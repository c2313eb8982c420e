// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use campus_co2::models::{Entry, Meal, MealType, Region, TransportMode, Trip, UsageLevel};
use campus_co2::services::report::{self, CSV_COLUMNS};
use common::{bus_day, car_day, date, tracker_with_profile};

#[test]
fn test_csv_has_header_and_sorted_rows() {
    let (mut tracker, _store, id) = tracker_with_profile("Alex Kim");
    tracker.save_entry(&id, car_day(date(2024, 3, 6))).unwrap();
    tracker.save_entry(&id, bus_day(date(2024, 3, 4))).unwrap();

    let csv = report::export_csv(tracker.profile(&id).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_COLUMNS.join(","));
    assert!(lines[1].starts_with("2024-03-04,0.800,2.000,0.000,2.800,4.000,1.200,AB,1,"));
    assert!(lines[2].starts_with("2024-03-06,8.000,3.300,0.000,11.300,10.000,-1.300,"));
    assert!(lines[1].contains("Bus(10km bus)"));
}

#[test]
fn test_csv_quotes_free_text() {
    let (mut tracker, _store, id) = tracker_with_profile("Alex");
    let mut entry = Entry::new(date(2024, 3, 4))
        .with_trip(
            Trip::new("Home, \"work\"", 12.0, TransportMode::Rideshare).with_occupancy(3.0),
        )
        .with_meal(Meal::new("Tofu bowl", MealType::Vegan))
        .with_electricity(Region::Saskatchewan, 2, UsageLevel::Low);
    entry.notes = Some("rain all day".to_string());
    tracker.save_entry(&id, entry).unwrap();

    let csv = report::export_csv(tracker.profile(&id).unwrap()).unwrap();
    let row = csv.lines().nth(1).unwrap();

    assert!(row.contains(",SK,2,low,"));
    // Only fields with a delimiter or quote are quoted
    assert!(row.contains(r#","Home, ""work""(12km rideshare occ=3)","#));
    assert!(row.ends_with(",Tofu bowl(vegan),rain all day"));
}

#[test]
fn test_csv_reads_back_with_original_text() {
    let (mut tracker, _store, id) = tracker_with_profile("Alex");
    let mut entry = Entry::new(date(2024, 3, 4))
        .with_trip(Trip::new("A, \"B\"", 1.0, TransportMode::Walk))
        .with_trip(Trip::new("C", 2.0, TransportMode::Bike))
        .with_meal(Meal::new("Soup", MealType::Vegan));
    entry.notes = Some("line one\nline two, \"quoted\"".to_string());
    tracker.save_entry(&id, entry).unwrap();

    let csv = report::export_csv(tracker.profile(&id).unwrap()).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_COLUMNS);

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(&record[0], "2024-03-04");
    assert_eq!(&record[4], "0.900");
    assert_eq!(&record[12], r#"A, "B"(1km walk) | C(2km bike)"#);
    assert_eq!(&record[13], "Soup(vegan)");
    assert_eq!(&record[14], "line one\nline two, \"quoted\"");
}

#[test]
fn test_csv_for_empty_profile_is_header_only() {
    let (tracker, _store, id) = tracker_with_profile("Alex");
    let csv = report::export_csv(tracker.profile(&id).unwrap()).unwrap();
    assert_eq!(csv, format!("{}\n", CSV_COLUMNS.join(",")));
}

#[test]
fn test_weekly_trend_covers_seven_days() {
    let (mut tracker, _store, id) = tracker_with_profile("Alex");
    tracker.save_entry(&id, bus_day(date(2024, 3, 1))).unwrap();
    tracker.save_entry(&id, car_day(date(2024, 3, 7))).unwrap();
    // Outside the window
    tracker.save_entry(&id, car_day(date(2024, 2, 29))).unwrap();

    let trend = report::weekly_trend(tracker.profile(&id).unwrap(), date(2024, 3, 7));

    assert_eq!(trend.len(), 7);
    assert_eq!(trend[0].date, date(2024, 3, 1));
    assert_eq!(trend[6].date, date(2024, 3, 7));
    assert!((trend[0].kg - 2.8).abs() < 1e-9);
    assert!((trend[6].kg - 11.3).abs() < 1e-9);
    assert!(trend[1..6].iter().all(|p| p.kg == 0.0));
}

#[test]
fn test_entry_reports_are_sorted_with_savings() {
    let (mut tracker, _store, id) = tracker_with_profile("Alex");
    tracker.save_entry(&id, car_day(date(2024, 3, 6))).unwrap();
    tracker.save_entry(&id, bus_day(date(2024, 3, 4))).unwrap();

    let reports = report::entry_reports(tracker.profile(&id).unwrap());
    assert_eq!(reports[0].date, date(2024, 3, 4));
    assert!((reports[0].savings_kg - 1.2).abs() < 1e-9);
    assert!((reports[1].savings_kg + 1.3).abs() < 1e-9);
}
