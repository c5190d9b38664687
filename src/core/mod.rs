//! Core business logic module
//!
//! This module contains the core expense tracking components:
//! - `record_store` - Append-only record storage, loading and saving
//! - `reducer` - Fork-join partitioning and partial-sum combination
//! - `persister` - Background saving with a completion signal

pub mod persister;
pub mod record_store;
pub mod reducer;

pub use persister::{CompletionSignal, Persister, SaveHandle, DEFAULT_POLL_INTERVAL};
pub use record_store::{RecordStore, StoreOrigin};
pub use reducer::{partition, sum_slice, PartialSums, DEFAULT_WORKERS};
