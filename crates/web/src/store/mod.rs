//! The record store seam.
//!
//! Records form an append-only list keyed by an auto-incrementing number.
//! Everything above this module talks to a `dyn RecordStore`, so the file
//! backed store used by the binary and the in-memory store used by tests are
//! interchangeable.

use std::io;
use std::sync::PoisonError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod file;
mod memory;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub number: u64,
    pub first: String,
    pub last: String,
}

/// Exact-match filter over records; absent fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub number: Option<u64>,
    pub first: Option<String>,
    pub last: Option<String>,
}

impl Criteria {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.first.is_none() && self.last.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.number.is_none_or(|number| number == record.number)
            && self.first.as_deref().is_none_or(|first| first == record.first)
            && self.last.as_deref().is_none_or(|last| last == record.last)
    }
}

/// A validated `first`/`last` pair taken from a form body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewRecord {
    pub first: String,
    pub last: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record store io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("record store is corrupt: {source}")]
    Corrupt {
        #[from]
        source: serde_json::Error,
    },

    #[error("record store lock is poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Appends a record under the next free number and returns it.
    ///
    /// # Errors
    ///
    /// Fails when the store can't be read or written; nothing is stored then.
    fn append(&self, first: &str, last: &str) -> Result<Record, StoreError>;

    /// Returns the records matching `criteria` in storage order.
    ///
    /// # Errors
    ///
    /// Fails when the store can't be read.
    fn query(&self, criteria: &Criteria) -> Result<Vec<Record>, StoreError>;
}

/// The last stored number plus one, or `1` for an empty store.
pub(crate) fn next_number(records: &[Record]) -> u64 {
    records.last().map_or(1, |record| record.number + 1)
}

pub(crate) fn select(records: &[Record], criteria: &Criteria) -> Vec<Record> {
    records.iter().filter(|record| criteria.matches(record)).cloned().collect()
}
