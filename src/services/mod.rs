// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - calculations and business logic.

pub mod achievements;
pub mod equivalence;
pub mod factors;
pub mod footprint;
pub mod missions;
pub mod report;
pub mod tracker;

pub use equivalence::{Equivalents, MeaningCard};
pub use footprint::{Footprint, FootprintCache};
pub use missions::{MissionId, MissionResult};
pub use report::{EntryReport, TrendPoint};
pub use tracker::{DaySummary, ProfileTracker, SaveOutcome};
