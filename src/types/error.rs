//! Error types for the Expense Tracker
//!
//! This module defines all error types that can occur while recording,
//! totalling and persisting expenses.
//!
//! # Error Categories
//!
//! - **Input Errors**: non-numeric or negative amounts typed by the user
//! - **Usage Errors**: asking for a total before anything was recorded
//! - **Concurrency Errors**: a reducer worker or the background save task died,
//!   or a tokio runtime could not be built
//! - **File I/O Errors**: the storage file could not be read or written

use thiserror::Error;

/// Main error type for the expense tracker
///
/// The first three variants are the user-facing errors that abort the
/// interactive loop. Their messages are printed to the console as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpenseError {
    /// The amount was not a number
    #[error("Error: Invalid input '{input}'. Please enter a numeric value for the amount.")]
    ParseError {
        /// The raw text that failed to parse
        input: String,
    },

    /// The amount was negative
    #[error("Error: Expense amount cannot be negative (got {amount}).")]
    RangeError {
        /// The rejected amount
        amount: f64,
    },

    /// A total was requested with no records
    #[error("Error: No expenses recorded. Please add expenses before calculating the total.")]
    EmptyStoreError,

    /// A reducer worker panicked, so no total could be produced
    #[error("Worker {worker} failed while summing expenses")]
    WorkerFailed {
        /// Index of the failed worker (its partial-sum slot)
        worker: usize,
    },

    /// The background save task did not run to completion
    #[error("Background save failed: {message}")]
    PersistFailed {
        /// Description of the failure
        message: String,
    },

    /// A tokio runtime for the reducer or the persister could not be built
    #[error("Failed to create tokio runtime: {message}")]
    Runtime {
        /// Description of the build failure
        message: String,
    },

    /// I/O error while reading or writing the storage file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for ExpenseError {
    fn from(error: std::io::Error) -> Self {
        ExpenseError::Io {
            message: error.to_string(),
        }
    }
}

impl ExpenseError {
    /// Create a ParseError
    pub fn parse_error(input: &str) -> Self {
        ExpenseError::ParseError {
            input: input.to_string(),
        }
    }

    /// Create a RangeError
    pub fn range_error(amount: f64) -> Self {
        ExpenseError::RangeError { amount }
    }

    /// Create a Runtime error from a failed runtime build
    pub fn runtime_error(error: std::io::Error) -> Self {
        ExpenseError::Runtime {
            message: error.to_string(),
        }
    }

    /// Whether this error ends the interactive session without saving
    ///
    /// Input and usage errors are reported to the user and end the session;
    /// everything else is an environment failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ExpenseError::ParseError { .. }
                | ExpenseError::RangeError { .. }
                | ExpenseError::EmptyStoreError
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::parse_error(
        ExpenseError::ParseError { input: "abc".to_string() },
        "Error: Invalid input 'abc'. Please enter a numeric value for the amount."
    )]
    #[case::range_error(
        ExpenseError::RangeError { amount: -4.5 },
        "Error: Expense amount cannot be negative (got -4.5)."
    )]
    #[case::empty_store(
        ExpenseError::EmptyStoreError,
        "Error: No expenses recorded. Please add expenses before calculating the total."
    )]
    #[case::worker_failed(
        ExpenseError::WorkerFailed { worker: 2 },
        "Worker 2 failed while summing expenses"
    )]
    #[case::persist_failed(
        ExpenseError::PersistFailed { message: "task cancelled".to_string() },
        "Background save failed: task cancelled"
    )]
    #[case::runtime(
        ExpenseError::runtime_error(std::io::Error::other("too many threads")),
        "Failed to create tokio runtime: too many threads"
    )]
    fn test_error_display(#[case] error: ExpenseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::parse(ExpenseError::parse_error("x"), true)]
    #[case::range(ExpenseError::range_error(-1.0), true)]
    #[case::empty(ExpenseError::EmptyStoreError, true)]
    #[case::worker(ExpenseError::WorkerFailed { worker: 0 }, false)]
    #[case::runtime(ExpenseError::Runtime { message: "no threads".to_string() }, false)]
    #[case::io(ExpenseError::Io { message: "denied".to_string() }, false)]
    fn test_is_user_error(#[case] error: ExpenseError, #[case] expected: bool) {
        assert_eq!(error.is_user_error(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ExpenseError = io_error.into();
        assert!(matches!(error, ExpenseError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
