// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current calendar day in the user's local time zone.
///
/// Only the outer layers call this; everything below takes `today` as an
/// argument.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc_rfc3339_uses_z() {
        let t = Utc.with_ymd_and_hms(2024, 2, 29, 8, 5, 9).unwrap();
        assert_eq!(format_utc_rfc3339(t), "2024-02-29T08:05:09Z");
    }
}
