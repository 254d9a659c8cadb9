//! Record model.
//!
//! A [`Record`] is a fixed-shape row. Its identity is the `id` field; the
//! store indexes `id` uniquely and `last` (case-folded) non-uniquely. The
//! remaining fields are payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier (the unique key)
pub type RecordId = i64;

/// Stable zero-based position of a record in the heap.
///
/// Assigned once at insertion and never reused, even after the record is
/// logically deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordSlot(pub usize);

impl RecordSlot {
    /// Returns the heap position
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single row in the heap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: RecordId,
    /// First name
    pub first: String,
    /// Last name (secondary key, matched case-insensitively)
    pub last: String,
    /// Major / department
    pub major: String,
    /// Grade point average
    pub gpa: f32,
    /// Logical delete marker; the only field that changes after insertion
    pub deleted: bool,
}

impl Record {
    /// Creates a live record with empty payload fields.
    pub fn new(id: RecordId, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            id,
            first: first.into(),
            last: last.into(),
            major: String::new(),
            gpa: 0.0,
            deleted: false,
        }
    }

    /// Set the major
    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.major = major.into();
        self
    }

    /// Set the GPA
    pub fn with_gpa(mut self, gpa: f32) -> Self {
        self.gpa = gpa;
        self
    }

    /// Returns true unless the record has been logically deleted
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builders() {
        let rec = Record::new(7, "Ada", "Lovelace")
            .with_major("Mathematics")
            .with_gpa(3.9);
        assert_eq!(rec.id, 7);
        assert_eq!(rec.last, "Lovelace");
        assert_eq!(rec.major, "Mathematics");
        assert!(rec.is_live());
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(RecordSlot(3).to_string(), "#3");
        assert_eq!(RecordSlot(3).index(), 3);
    }
}
