//! # RowLite
//!
//! A small in-memory record store with instrumented ordered indexes.
//!
//! Records live in an append-only heap. An identifier index answers point and
//! range lookups; a case-insensitive last-name index answers prefix lookups.
//! Every query reports how many key comparisons the index spent, so search
//! cost can be observed and asserted on.
//!
//! ## Quick Start
//!
//! ```rust
//! use rowlite::{Record, RecordStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = RecordStore::new();
//! store.insert_record(Record::new(10, "Grace", "Hopper"))?;
//! store.insert_record(Record::new(20, "Edsger", "Dijkstra"))?;
//! store.insert_record(Record::new(30, "Barbara", "Liskov"))?;
//!
//! // Point lookup
//! let hit = store.find_by_id(20);
//! assert_eq!(hit.value.map(|r| r.first.as_str()), Some("Edsger"));
//! println!("found in {} comparisons", hit.comparisons);
//!
//! // Inclusive range
//! let (records, _) = store.range_by_id(10, 20).into_parts();
//! assert_eq!(records.len(), 2);
//!
//! // Case-insensitive prefix
//! assert_eq!(store.prefix_by_last("hop").value.len(), 1);
//!
//! // Logical delete
//! assert!(store.delete_by_id(10));
//! assert!(store.find_by_id(10).value.is_none());
//! assert_eq!(store.heap_len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Duplicate identifiers
//!
//! By default a second insert with an existing id repoints the identifier
//! index at the new row (last write wins). Use
//! [`StoreConfig::rejecting_duplicates`] to get [`Error::DuplicateKey`]
//! instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

// Re-export core types
pub use rowlite_core::{Error, Iter, OrderedIndex, Record, RecordId, RecordSlot, Result};

// Storage components
pub use rowlite_storage::{
    fold_key, prefix_upper_bound, DuplicatePolicy, Measured, RecordStore, StoreConfig,
    StoreStats, PREFIX_SENTINEL,
};

/// Crate version, taken from the package manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
