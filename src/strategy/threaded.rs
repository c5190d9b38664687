//! Threaded reduction strategy
//!
//! Runs one OS thread per slice using scoped threads. Each worker gets an
//! exclusive `&mut` to its own partial-sum slot, so the borrow checker
//! guarantees that no two workers write the same slot and that nobody reads
//! a slot before the barrier.
//!
//! ```text
//! records ──partition──► [s0] [s1] [s2] [s3]
//!                          │    │    │    │    (one scoped thread each)
//!                          ▼    ▼    ▼    ▼
//! PartialSums            [p0] [p1] [p2] [p3]
//!                          └────┴────┴────┴──► combine() → total
//! ```

use crate::core::reducer::{partition, sum_slice, PartialSums};
use crate::strategy::{ReducerConfig, ReductionStrategy};
use crate::types::{Amount, ExpenseError, Record};

/// Threaded reduction strategy
#[derive(Debug, Clone)]
pub struct ThreadedReducer {
    config: ReducerConfig,
}

impl ThreadedReducer {
    /// Create a new ThreadedReducer with the specified configuration
    pub fn new(config: ReducerConfig) -> Self {
        Self { config }
    }
}

impl ReductionStrategy for ThreadedReducer {
    fn total(&self, records: &[Record]) -> Result<Amount, ExpenseError> {
        if records.is_empty() {
            return Err(ExpenseError::EmptyStoreError);
        }
        reduce_with(records, self.config.workers(), sum_slice)
    }
}

/// Fork-join over `workers` scoped threads, applying `sum` to each slice
fn reduce_with<F>(records: &[Record], workers: usize, sum: F) -> Result<Amount, ExpenseError>
where
    F: Fn(&[Record]) -> Amount + Sync,
{
    let slices = partition(records.len(), workers);
    tracing::debug!(records = records.len(), workers, ?slices, "threaded reduction");

    let mut partials = PartialSums::new(workers);
    let sum = &sum;

    let failed = std::thread::scope(|scope| {
        let handles: Vec<_> = partials
            .slots_mut()
            .iter_mut()
            .zip(slices)
            .map(|(slot, range)| {
                let slice = &records[range];
                scope.spawn(move || *slot = sum(slice))
            })
            .collect();

        // Join every worker before leaving the scope, remembering the first failure.
        let mut failed = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                tracing::error!(worker, "reducer worker panicked");
                failed.get_or_insert(worker);
            }
        }
        failed
    });

    if let Some(worker) = failed {
        return Err(ExpenseError::WorkerFailed { worker });
    }

    Ok(partials.combine())
}
