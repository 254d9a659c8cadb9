//! # RowLite Core
//!
//! Core types and the ordered index for the RowLite record store.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of RowLite.**
//! Users should depend on the main `rowlite` crate instead.
//!
//! - [`OrderedIndex`]: AVL-balanced ordered map with comparison counting
//! - [`Record`], [`RecordId`], [`RecordSlot`]: the row model stored in the heap
//! - [`Error`], [`Result`]: error handling shared by every crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod index;
pub mod record;

pub use error::{Error, Result};
pub use index::{Iter, OrderedIndex};
pub use record::{Record, RecordId, RecordSlot};
