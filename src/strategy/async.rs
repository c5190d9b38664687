//! Asynchronous reduction strategy
//!
//! This module provides a tokio-based implementation of the
//! ReductionStrategy trait. Each slice is summed by its own task on a
//! multi-threaded runtime, and the tasks are joined in slot order.
//!
//! # Architecture
//!
//! ```text
//! AsyncReducer
//!     ├── ReducerConfig (workers)
//!     ├── tokio runtime (min(workers, CPU cores) threads)
//!     └── Arc<[Record]> snapshot shared by the worker tasks
//! ```
//!
//! Tasks spawned on the runtime must be `'static`, so the records are copied
//! once into a reference-counted slice that every task can hold.

use crate::core::reducer::{partition, sum_slice, PartialSums};
use crate::strategy::{ReducerConfig, ReductionStrategy};
use crate::types::{Amount, ExpenseError, Record};
use futures::future::join_all;
use std::sync::Arc;

/// Asynchronous reduction strategy
#[derive(Debug, Clone)]
pub struct AsyncReducer {
    /// Reducer configuration
    config: ReducerConfig,
}

impl AsyncReducer {
    /// Create a new AsyncReducer with the specified configuration
    pub fn new(config: ReducerConfig) -> Self {
        Self { config }
    }

    /// Runtime threads to use: one per worker, capped at the CPU count
    fn runtime_threads(&self) -> usize {
        self.config.workers().min(num_cpus::get()).max(1)
    }
}

impl ReductionStrategy for AsyncReducer {
    fn total(&self, records: &[Record]) -> Result<Amount, ExpenseError> {
        if records.is_empty() {
            return Err(ExpenseError::EmptyStoreError);
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.runtime_threads())
            .thread_name("expense-reducer")
            .build()
            .map_err(ExpenseError::runtime_error)?;

        let snapshot: Arc<[Record]> = Arc::from(records);
        runtime.block_on(reduce_with(snapshot, self.config.workers(), sum_slice))
    }
}

/// Fork-join over `workers` tokio tasks, applying `sum` to each slice
async fn reduce_with(
    records: Arc<[Record]>,
    workers: usize,
    sum: fn(&[Record]) -> Amount,
) -> Result<Amount, ExpenseError> {
    let slices = partition(records.len(), workers);
    tracing::debug!(records = records.len(), workers, ?slices, "async reduction");

    let tasks = slices.into_iter().map(|range| {
        let records = Arc::clone(&records);
        tokio::spawn(async move { sum(&records[range]) })
    });

    // join_all keeps the task order, so results line up with slots.
    let results = join_all(tasks).await;

    let mut partials = PartialSums::new(workers);
    let mut failed = None;
    for (worker, result) in results.into_iter().enumerate() {
        match result {
            Ok(partial) => partials.set(worker, partial),
            Err(e) => {
                tracing::error!(worker, error = %e, "reducer task panicked");
                failed.get_or_insert(worker);
            }
        }
    }

    if let Some(worker) = failed {
        return Err(ExpenseError::WorkerFailed { worker });
    }

    Ok(partials.combine())
}
