//! Expense record types for the Expense Tracker
//!
//! This module defines the single entry type the tracker stores: one
//! category/amount pair as typed by the user.

use std::fmt;

/// Expense category name
///
/// Categories are stored verbatim. The storage format splits on whitespace,
/// so categories containing whitespace do not survive a save/load cycle.
pub type Category = String;

/// Amount spent, as a plain floating-point number
pub type Amount = f64;

/// One expense entry
///
/// Records are immutable once appended to a store. The `amount` is always
/// finite and non-negative; [`RecordStore::append`](crate::core::RecordStore::append)
/// and the storage reader both reject anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The category this expense belongs to (e.g. "groceries")
    pub category: Category,

    /// Amount spent
    pub amount: Amount,
}

impl Record {
    /// Create a new record
    ///
    /// No validation happens here; callers are expected to have validated
    /// the amount already.
    pub fn new(category: impl Into<Category>, amount: Amount) -> Self {
        Record {
            category: category.into(),
            amount,
        }
    }
}

impl fmt::Display for Record {
    /// Console form of a record: `- <category>: $<amount>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}: ${}", self.category, self.amount)
    }
}
