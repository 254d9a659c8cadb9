//! Store configuration.

use serde::{Deserialize, Serialize};

/// What `insert_record` does with an identifier that is already indexed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Repoint the identifier index at the new slot (last write wins).
    /// The superseded row stays in the heap.
    #[default]
    Overwrite,
    /// Fail with `Error::DuplicateKey` and leave the store untouched
    Reject,
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Handling of duplicate identifiers
    pub duplicate_policy: DuplicatePolicy,
    /// Number of records to preallocate in the heap
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Overwrite,
            initial_capacity: 0,
        }
    }
}

impl StoreConfig {
    /// Create config that rejects duplicate identifiers
    pub fn rejecting_duplicates() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            ..Default::default()
        }
    }

    /// Set the duplicate identifier policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the heap preallocation
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
