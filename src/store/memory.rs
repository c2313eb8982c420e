// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and previews.

use dashmap::DashMap;
use std::sync::Arc;

use super::{ProfileStore, StoreError};

/// Process-local key-value store.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what the tracker wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ProfileStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}
