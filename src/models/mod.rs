// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod entry;
pub mod lenient;
pub mod profile;

pub use entry::{Entry, Meal, MealType, ParseEnumError, Region, TransportMode, Trip, UsageLevel};
pub use profile::{Badge, BaselineHabits, Profile, ProfileSettings};

/// Generate an opaque identifier such as `entry_9f3a0c1d2e4b5a67_18f2c3d4e5f`.
///
/// Random bits plus the creation time in milliseconds, both in hex.
pub fn generate_id(prefix: &str) -> String {
    let random: u64 = rand::random();
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}_{:016x}_{:x}", prefix, random, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_has_prefix_and_is_unique() {
        let a = generate_id("profile");
        let b = generate_id("profile");
        assert!(a.starts_with("profile_"));
        assert_ne!(a, b);
    }
}
