//! Reduction strategy module for the parallel expense total
//!
//! This module defines the Strategy pattern for computing the total of all
//! recorded expenses. Both implementations split the records with the same
//! partition function and combine partial sums in the same order, so they
//! produce identical totals; they differ only in how the workers run.

use crate::cli::StrategyType;
use crate::core::reducer::DEFAULT_WORKERS;
use crate::types::{Amount, ExpenseError, Record};

pub mod r#async;
pub mod threaded;

pub use self::r#async::AsyncReducer;
pub use threaded::ThreadedReducer;

/// Configuration shared by all reduction strategies
///
/// Always holds at least one worker; build it with [`ReducerConfig::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct ReducerConfig {
    /// Number of workers, and therefore slices, per total computation
    workers: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ReducerConfig {
    /// Create a ReducerConfig, falling back to the default for zero workers
    pub fn new(workers: usize) -> Self {
        let default = Self::default();

        let workers = if workers == 0 {
            tracing::warn!(
                workers,
                default = default.workers,
                "invalid worker count, using default"
            );
            default.workers
        } else {
            workers
        };

        Self { workers }
    }

    /// Number of workers per total computation, never zero
    pub fn workers(&self) -> usize {
        self.workers
    }
}

/// Reduction strategy trait for computing the expense total
///
/// Implementations must:
/// - fail with [`ExpenseError::EmptyStoreError`] when `records` is empty
/// - run one worker per slice of [`partition`](crate::core::partition)
/// - block until every worker has finished
/// - fail with [`ExpenseError::WorkerFailed`] if any worker panicked
pub trait ReductionStrategy: Send + Sync {
    /// Compute the total amount of `records`
    fn total(&self, records: &[Record]) -> Result<Amount, ExpenseError>;
}

/// Create a reduction strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Which strategy to create (Threaded or Async)
/// * `config` - Optional reducer configuration; defaults to 4 workers
///
/// # Returns
///
/// A boxed trait object implementing the ReductionStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ReducerConfig>,
) -> Box<dyn ReductionStrategy> {
    let config = config.unwrap_or_default();
    match strategy_type {
        StrategyType::Threaded => Box::new(ThreadedReducer::new(config)),
        StrategyType::Async => Box::new(AsyncReducer::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_workers(0, DEFAULT_WORKERS)]
    #[case::one(1, 1)]
    #[case::eight(8, 8)]
    fn test_reducer_config_new(#[case] workers: usize, #[case] expected: usize) {
        assert_eq!(ReducerConfig::new(workers).workers(), expected);
    }

    #[test]
    fn test_reducer_config_default_is_four_workers() {
        assert_eq!(ReducerConfig::default().workers(), 4);
    }

    #[rstest]
    fn test_strategies_agree_bit_for_bit(
        #[values(StrategyType::Threaded, StrategyType::Async)] strategy_type: StrategyType,
        #[values(1, 3, 4, 17, 18, 1000)] len: usize,
    ) {
        // Amounts that do not sum exactly, so any change in order would show.
        let records: Vec<Record> = (0..len)
            .map(|i| Record::new("misc", 0.1 * (i as f64 + 1.0)))
            .collect();

        let reference = ThreadedReducer::new(ReducerConfig::default())
            .total(&records)
            .unwrap();
        let total = create_strategy(strategy_type, None).total(&records).unwrap();

        assert_eq!(total.to_bits(), reference.to_bits());
    }

    #[rstest]
    fn test_strategies_with_zero_workers_use_default(
        #[values(StrategyType::Threaded, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let records: Vec<Record> = (1..=5).map(|i| Record::new("misc", i as f64)).collect();

        let strategy = create_strategy(strategy_type, Some(ReducerConfig::new(0)));

        assert_eq!(strategy.total(&records), Ok(15.0));
    }

    #[rstest]
    fn test_strategies_reject_empty_records(
        #[values(StrategyType::Threaded, StrategyType::Async)] strategy_type: StrategyType,
    ) {
        let strategy = create_strategy(strategy_type, Some(ReducerConfig::new(4)));
        assert_eq!(strategy.total(&[]), Err(ExpenseError::EmptyStoreError));
    }

    #[test]
    fn test_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThreadedReducer>();
        assert_send_sync::<AsyncReducer>();
    }
}
