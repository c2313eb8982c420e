// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Campus CO2: a local-first personal footprint logger.
//!
//! This crate estimates daily CO2e from logged trips, meals, and household
//! electricity, compares it to a personal baseline, and layers missions,
//! badges, and streaks on top. Profiles persist through a pluggable
//! key-value store.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

pub use error::{Result, TrackerError};
pub use models::{Entry, Profile};
pub use services::ProfileTracker;
