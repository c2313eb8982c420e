// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! The calculators never fail; these errors come from profile management
//! and persistence.

use crate::store::StoreError;

/// Errors from the profile tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("No active profile")]
    NoActiveProfile,

    #[error("Invalid settings: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for TrackerError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Storage error");
        TrackerError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TrackerError {
    fn from(err: validator::ValidationErrors) -> Self {
        TrackerError::Validation(err.to_string())
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
