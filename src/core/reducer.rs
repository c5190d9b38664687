//! Fork-join building blocks for the parallel total
//!
//! Both reduction strategies share the pieces in this module so they agree
//! on slice boundaries and combination order:
//!
//! ```text
//! records [0, N)
//!     ├── partition(N, W)  → W contiguous slices, [i*N/W, (i+1)*N/W)
//!     ├── sum_slice(...)   → one partial sum per worker, written to its slot
//!     └── PartialSums::combine → slot-ordered sequential sum
//! ```
//!
//! # Partitioning
//!
//! Boundaries use truncating integer division, so when `N` is not a
//! multiple of `W` the shortfall lands on the earlier slices and the later
//! ones are longer. For N=18, W=4 the slices are 4, 4, 4 and 6 long.

use crate::types::{Amount, Record};
use std::ops::Range;

/// Default number of reducer workers
pub const DEFAULT_WORKERS: usize = 4;

/// Split `[0, len)` into `workers` contiguous slices
///
/// Slice `i` covers `[i*len/workers, (i+1)*len/workers)`. The slices cover
/// the range exactly once with no gaps; some may be empty when
/// `len < workers`.
///
/// # Panics
///
/// Panics if `workers` is zero.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "partition needs at least one worker");
    (0..workers)
        .map(|i| (i * len / workers)..((i + 1) * len / workers))
        .collect()
}

/// Sum the amounts of one slice
pub fn sum_slice(records: &[Record]) -> Amount {
    records.iter().map(|record| record.amount).sum()
}

/// One write-once accumulator slot per worker
///
/// Created fresh for every total computation. Each worker owns exactly one
/// slot, so no slot is ever written concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialSums {
    slots: Vec<Amount>,
}

impl PartialSums {
    /// Create a table of `workers` zeroed slots
    pub fn new(workers: usize) -> Self {
        PartialSums {
            slots: vec![0.0; workers],
        }
    }

    /// Mutable access to every slot, for handing one to each worker
    pub fn slots_mut(&mut self) -> &mut [Amount] {
        &mut self.slots
    }

    /// Write the result of worker `worker`
    pub fn set(&mut self, worker: usize, sum: Amount) {
        self.slots[worker] = sum;
    }

    /// Read-only view of the slots
    pub fn slots(&self) -> &[Amount] {
        &self.slots
    }

    /// Sum the slots sequentially, in slot order
    pub fn combine(&self) -> Amount {
        let mut total = 0.0;
        for sum in &self.slots {
            total += sum;
        }
        total
    }
}
