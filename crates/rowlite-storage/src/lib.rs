//! # RowLite Storage
//!
//! Record heap and indexes for RowLite.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of RowLite.**
//!
//! Users should depend on the main `rowlite` crate instead, which provides
//! the stable public API. This crate's API may change without notice between
//! minor versions.
//!
//! ---
//!
//! [`RecordStore`] keeps every record in an append-only heap and maintains
//! two [`OrderedIndex`] instances over it:
//!
//! - **Identifier index**: `RecordId -> RecordSlot`, unique
//! - **Last-name index**: lowercased last name `-> Vec<RecordSlot>` (postings
//!   in insertion order), duplicates allowed
//!
//! ## Architecture
//!
//! ```text
//! find_by_id / range_by_id ──→ identifier index ─┐
//!                                                ├─→ slot ─→ heap[slot] (skip if deleted)
//! prefix_by_last ───────────→ last-name index ───┘
//! ```
//!
//! Deletion is logical: the row is flagged in the heap and its identifier
//! entry is erased, but its last-name postings stay until
//! [`RecordStore::compact_postings`] runs. Readers filter flagged rows.

use rowlite_core::{Error, OrderedIndex, Record, RecordId, RecordSlot, Result};
use serde::Serialize;
use tracing::{debug, trace, warn};

pub mod config;
pub mod keys;

pub use config::{DuplicatePolicy, StoreConfig};
pub use keys::{fold_key, prefix_upper_bound, PREFIX_SENTINEL};

/// A query result together with the number of key comparisons the index
/// performed to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    /// The query result
    pub value: T,
    /// Key comparisons spent by the index on this query alone
    pub comparisons: u64,
}

impl<T> Measured<T> {
    /// Splits into `(value, comparisons)`
    pub fn into_parts(self) -> (T, u64) {
        (self.value, self.comparisons)
    }
}

/// Record store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Rows in the heap, deleted or not
    pub heap_records: usize,
    /// Rows not flagged as deleted
    pub live_records: usize,
    /// Rows flagged as deleted
    pub deleted_records: usize,
    /// Entries in the identifier index
    pub id_keys: usize,
    /// Distinct lowercased last names in the last-name index
    pub last_name_keys: usize,
    /// Total slots held across all postings lists
    pub postings: usize,
    /// Postings pointing at deleted rows
    pub stale_postings: usize,
}

/// In-memory record store with a unique identifier index and a
/// case-insensitive last-name index.
///
/// # Examples
///
/// ```
/// use rowlite_core::Record;
/// use rowlite_storage::RecordStore;
///
/// let mut store = RecordStore::new();
/// store.insert_record(Record::new(1, "Ada", "Lovelace"))?;
/// store.insert_record(Record::new(2, "Alan", "Turing"))?;
///
/// let hit = store.find_by_id(2);
/// assert_eq!(hit.value.map(|r| r.last.as_str()), Some("Turing"));
///
/// let matches = store.prefix_by_last("LOVE");
/// assert_eq!(matches.value.len(), 1);
/// # Ok::<(), rowlite_core::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct RecordStore {
    config: StoreConfig,
    heap: Vec<Record>,
    by_id: OrderedIndex<RecordId, RecordSlot>,
    by_last: OrderedIndex<String, Vec<RecordSlot>>,
}

impl RecordStore {
    /// Creates an empty store with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with a custom configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            heap: Vec::with_capacity(config.initial_capacity),
            config,
            by_id: OrderedIndex::new(),
            by_last: OrderedIndex::new(),
        }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Appends a record to the heap and indexes it.
    ///
    /// The record is stored live regardless of its incoming `deleted` flag.
    /// Returns the record's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] when the identifier is already indexed
    /// and the store is configured with [`DuplicatePolicy::Reject`]. Nothing
    /// is appended in that case.
    pub fn insert_record(&mut self, mut record: Record) -> Result<RecordId> {
        let id = record.id;
        if self.config.duplicate_policy == DuplicatePolicy::Reject && self.by_id.contains_key(&id)
        {
            return Err(Error::DuplicateKey(id));
        }

        let slot = RecordSlot(self.heap.len());
        let key = fold_key(&record.last);
        record.deleted = false;
        self.heap.push(record);

        if let Some(previous) = self.by_id.insert(id, slot) {
            warn!(id, %previous, %slot, "Duplicate record id, index now points at the newer row");
        }

        match self.by_last.find_mut(key.as_str()) {
            Some(postings) => postings.push(slot),
            None => {
                self.by_last.insert(key, vec![slot]);
            }
        }

        debug!(id, %slot, "Inserted record");
        Ok(id)
    }

    /// Logically deletes the record with `id`.
    ///
    /// Flags the heap row and erases the identifier entry. Returns false,
    /// changing nothing, if the id is not indexed or maps outside the heap.
    pub fn delete_by_id(&mut self, id: RecordId) -> bool {
        let Some(&slot) = self.by_id.find(&id) else {
            return false;
        };
        let Some(record) = self.heap.get_mut(slot.index()) else {
            return false;
        };

        record.deleted = true;
        self.by_id.erase(&id);
        debug!(id, %slot, "Deleted record");
        true
    }

    /// Point lookup by identifier.
    ///
    /// The comparison count is reported even on a miss.
    pub fn find_by_id(&self, id: RecordId) -> Measured<Option<&Record>> {
        self.by_id.reset_metrics();
        let record = self
            .by_id
            .find(&id)
            .and_then(|&slot| live_record(&self.heap, slot));
        let comparisons = self.by_id.comparisons();

        trace!(id, comparisons, hit = record.is_some(), "find_by_id");
        Measured {
            value: record,
            comparisons,
        }
    }

    /// All live records with `lo <= id <= hi`, in ascending id order.
    pub fn range_by_id(&self, lo: RecordId, hi: RecordId) -> Measured<Vec<&Record>> {
        let heap = &self.heap;
        let mut records = Vec::new();

        self.by_id.reset_metrics();
        self.by_id.range_apply(&lo, &hi, |_, &slot| {
            if let Some(record) = live_record(heap, slot) {
                records.push(record);
            }
        });
        let comparisons = self.by_id.comparisons();

        trace!(lo, hi, comparisons, matched = records.len(), "range_by_id");
        Measured {
            value: records,
            comparisons,
        }
    }

    /// All live records whose last name starts with `prefix`, ignoring case.
    ///
    /// Results come in ascending key order, then insertion order within a
    /// key.
    pub fn prefix_by_last(&self, prefix: &str) -> Measured<Vec<&Record>> {
        let lower = fold_key(prefix);
        let upper = prefix_upper_bound(&lower);
        let heap = &self.heap;
        let mut records = Vec::new();

        self.by_last.reset_metrics();
        self.by_last
            .range_apply(lower.as_str(), upper.as_str(), |key, postings| {
                if !key.starts_with(lower.as_str()) {
                    return;
                }
                records.extend(postings.iter().filter_map(|&slot| live_record(heap, slot)));
            });
        let comparisons = self.by_last.comparisons();

        trace!(prefix, comparisons, matched = records.len(), "prefix_by_last");
        Measured {
            value: records,
            comparisons,
        }
    }

    /// Raw heap access; returns deleted rows too
    pub fn get(&self, slot: RecordSlot) -> Option<&Record> {
        self.heap.get(slot.index())
    }

    /// Number of rows in the heap, including deleted ones
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Number of rows not flagged as deleted
    pub fn live_len(&self) -> usize {
        self.heap.iter().filter(|record| record.is_live()).count()
    }

    /// Returns true if nothing was ever inserted
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops postings that point at deleted rows.
    ///
    /// Keys left without postings are removed from the last-name index. The
    /// heap is untouched and slots are never renumbered. Returns the number
    /// of postings removed.
    pub fn compact_postings(&mut self) -> usize {
        let heap = &self.heap;
        let mut removed = 0;

        self.by_last.retain(|_, postings| {
            let before = postings.len();
            postings.retain(|&slot| live_record(heap, slot).is_some());
            removed += before - postings.len();
            !postings.is_empty()
        });

        debug!(removed, keys = self.by_last.len(), "Compacted last-name postings");
        removed
    }

    /// Returns store statistics
    pub fn stats(&self) -> StoreStats {
        let live_records = self.live_len();
        let mut postings = 0;
        let mut stale_postings = 0;
        for (_, slots) in &self.by_last {
            postings += slots.len();
            stale_postings += slots
                .iter()
                .filter(|&&slot| live_record(&self.heap, slot).is_none())
                .count();
        }

        StoreStats {
            heap_records: self.heap.len(),
            live_records,
            deleted_records: self.heap.len() - live_records,
            id_keys: self.by_id.len(),
            last_name_keys: self.by_last.len(),
            postings,
            stale_postings,
        }
    }
}

/// Resolves a slot to its row if it is in bounds and not deleted
#[inline]
fn live_record(heap: &[Record], slot: RecordSlot) -> Option<&Record> {
    heap.get(slot.index()).filter(|record| record.is_live())
}
