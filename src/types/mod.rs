//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `record`: the expense record and its field types
//! - `error`: error types for the expense tracker

pub mod error;
pub mod record;

pub use error::ExpenseError;
pub use record::{Amount, Category, Record};
