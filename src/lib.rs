//! Expense Tracker Library
//! # Overview
//!
//! This library provides a personal expense log: category/amount records
//! kept in a flat text file, with a parallel total and background saving.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Record, ExpenseError)
//! - [`cli`] - CLI argument parsing and the interactive session
//! - [`core`] - Business logic components:
//!   - [`core::record_store`] - Append-only record store, load and save
//!   - [`core::reducer`] - Fork-join partitioning and partial sums
//!   - [`core::persister`] - Background save with a completion signal
//! - [`strategy`] - Interchangeable threaded and async total reducers
//! - [`io`] - Storage file format and reader
//!
//! # Storage Format
//!
//! One record per line, `<category> <amount>`, separated by whitespace.
//! Loading stops at the first malformed line.
//!
//! # Parallel Total
//!
//! The total splits `N` records into `W` (default 4) contiguous slices,
//! slice `i` covering `[i*N/W, (i+1)*N/W)`, sums each slice on its own
//! worker and adds the partial sums in slot order.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{CompletionSignal, Persister, RecordStore, SaveHandle};
pub use strategy::{create_strategy, ReducerConfig, ReductionStrategy};
pub use types::{Amount, Category, ExpenseError, Record};
