//! Record storage for the expense session
//!
//! This module provides the RecordStore component: the append-only,
//! insertion-ordered list of expenses recorded in a session, together with
//! loading it from and flushing it to the storage file.
//!
//! # Append-Only
//!
//! Records are never updated or removed. The only mutation is
//! [`RecordStore::append`], which validates the amount first and leaves the
//! store untouched when validation fails.

use crate::io::record_reader::RecordReader;
use crate::io::text_format::{parse_amount, write_records};
use crate::types::{ExpenseError, Record};
use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::path::Path;

/// Whether a store was loaded from an existing file or started empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrigin {
    /// The storage file existed and was read
    Resumed,
    /// No storage file was found
    Fresh,
}

/// Append-only store of expense records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    /// Records in insertion order
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Create a store holding the given records, in order
    pub fn from_records(records: Vec<Record>) -> Self {
        RecordStore { records }
    }

    /// Load records from a storage file
    ///
    /// Parsing stops at the first malformed line; the records before it are
    /// kept and the rest of the file is ignored. A file that is missing or
    /// cannot be read yields an empty list.
    pub fn load(source: &Path) -> Vec<Record> {
        Self::read(source).unwrap_or_default()
    }

    /// Open the session store from a storage file
    ///
    /// Like [`RecordStore::load`], but also reports whether existing records
    /// were read. An unreadable file is logged and treated as
    /// [`StoreOrigin::Fresh`].
    pub fn open(source: &Path) -> (Self, StoreOrigin) {
        match Self::read(source) {
            Some(records) => (Self::from_records(records), StoreOrigin::Resumed),
            None => (Self::new(), StoreOrigin::Fresh),
        }
    }

    /// Read the storage file, returning `None` when it is missing or unreadable
    fn read(source: &Path) -> Option<Vec<Record>> {
        let mut reader = match RecordReader::open(source) {
            Ok(reader) => reader,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %source.display(), "no storage file found");
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    path = %source.display(),
                    error = %e,
                    "cannot open storage file, starting fresh"
                );
                return None;
            }
        };

        let records = match reader.by_ref().collect::<Result<Vec<_>, _>>() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %source.display(),
                    error = %e,
                    "cannot read storage file, starting fresh"
                );
                return None;
            }
        };

        if let Some(truncation) = reader.stopped_at() {
            tracing::warn!(
                path = %source.display(),
                line = truncation.line,
                reason = %truncation.reason,
                kept = records.len(),
                "stopped loading at malformed line"
            );
        }
        tracing::debug!(path = %source.display(), count = records.len(), "loaded records");

        Some(records)
    }

    /// Validate and append a new record
    ///
    /// # Arguments
    ///
    /// * `category` - Category name, stored verbatim
    /// * `raw_amount` - Amount as typed by the user
    ///
    /// # Returns
    ///
    /// * `Ok(&Record)` - The newly appended record
    /// * `Err(ExpenseError::ParseError)` - `raw_amount` is not numeric
    /// * `Err(ExpenseError::RangeError)` - `raw_amount` is negative
    pub fn append(&mut self, category: &str, raw_amount: &str) -> Result<&Record, ExpenseError> {
        let amount = parse_amount(raw_amount)?;
        self.records.push(Record::new(category, amount));
        Ok(&self.records[self.records.len() - 1])
    }

    /// All records whose category matches exactly, in insertion order
    pub fn find_by_category(&self, category: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record to `destination`, replacing its previous contents
    ///
    /// This truncates and rewrites the file in place; it is not atomic.
    pub fn save(&self, destination: &Path) -> Result<(), ExpenseError> {
        let file = File::create(destination)?;
        let mut writer = BufWriter::new(file);
        write_records(&self.records, &mut writer)?;
        tracing::info!(path = %destination.display(), count = self.records.len(), "saved records");
        Ok(())
    }
}
