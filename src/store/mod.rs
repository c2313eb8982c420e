// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: a string key-value store holding the whole profile
//! collection.
//!
//! The collection is always written as a whole, so concurrent writers
//! (two processes sharing one store) are last-writer-wins. There is no
//! locking or merge.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;

use crate::models::Profile;

/// Storage key names.
pub mod keys {
    /// Serialized `Vec<Profile>`
    pub const PROFILES: &str = "uofa_co2_profiles_v1";
    /// Id of the profile the user last selected
    pub const ACTIVE_PROFILE: &str = "uofa_co2_active_profile_v1";
}

/// Errors from the underlying key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {key}: {message}")]
    Read { key: String, message: String },

    #[error("Failed to write {key}: {message}")]
    Write { key: String, message: String },

    #[error("Failed to encode profiles: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A key-value store of strings, in the manner of browser local storage.
///
/// Implementors provide `get_item`/`set_item`; profile loading and saving
/// are built on top.
pub trait ProfileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    /// Load the profile collection.
    ///
    /// Missing or unparseable JSON yields an empty collection rather than an
    /// error, so a damaged store never locks the user out. Each profile is
    /// decoded on its own, so one unreadable record only costs that record.
    fn load_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let Some(raw) = self.get_item(keys::PROFILES)? else {
            return Ok(Vec::new());
        };

        let records = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                tracing::warn!("Stored profiles are not a list, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored profiles are unreadable, starting empty");
                return Ok(Vec::new());
            }
        };

        let stored = records.len();
        let profiles: Vec<Profile> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Profile>(record) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable stored profile");
                    None
                }
            })
            .collect();

        tracing::debug!(count = profiles.len(), stored, "Loaded profiles");
        Ok(profiles)
    }

    /// Overwrite the whole profile collection.
    fn save_profiles(&self, profiles: &[Profile]) -> Result<(), StoreError> {
        let json = serde_json::to_string(profiles)?;
        self.set_item(keys::PROFILES, &json)?;
        tracing::debug!(count = profiles.len(), bytes = json.len(), "Saved profiles");
        Ok(())
    }

    fn load_active_profile_id(&self) -> Result<Option<String>, StoreError> {
        self.get_item(keys::ACTIVE_PROFILE)
    }

    fn save_active_profile_id(&self, id: Option<&str>) -> Result<(), StoreError> {
        match id {
            Some(id) => self.set_item(keys::ACTIVE_PROFILE, id),
            None => self.remove_item(keys::ACTIVE_PROFILE),
        }
    }
}
