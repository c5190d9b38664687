//! Background persistence with a completion signal
//!
//! This module provides the `Persister`, which writes the record store to
//! storage on a background tokio task and hands the caller a [`SaveHandle`]
//! to poll for completion.
//!
//! # Architecture
//!
//! ```text
//! Persister (owns a single-worker tokio runtime)
//!     └── save_async(store, path) → SaveHandle
//!             ├── CompletionSignal (Arc<AtomicBool>, false → true once)
//!             ├── JoinHandle       (write result)
//!             └── Arc<Runtime>     (keeps the task's runtime alive)
//! ```
//!
//! # Ownership
//!
//! The background task never borrows the store. `save_async` takes an
//! `Arc<[Record]>` snapshot, so the file always reflects the store as it was
//! when the save was scheduled, and the caller is free to keep using or drop
//! the store meanwhile.

use crate::core::record_store::RecordStore;
use crate::io::text_format::render_records;
use crate::types::{ExpenseError, Record};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

/// Default interval between completion polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One-shot completion flag shared between a save task and its caller
///
/// Clones share the same flag. It starts `false` and is set to `true`
/// exactly once.
#[derive(Debug, Clone, Default)]
pub struct CompletionSignal {
    done: Arc<AtomicBool>,
}

impl CompletionSignal {
    /// Create a signal in the not-completed state
    pub fn new() -> Self {
        CompletionSignal {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark completion
    ///
    /// Returns `true` if this call flipped the flag, `false` if it was
    /// already set.
    pub fn complete(&self) -> bool {
        !self.done.swap(true, Ordering::AcqRel)
    }

    /// Whether completion has been signalled
    pub fn is_complete(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// Schedules background saves of a record store
#[derive(Debug, Clone)]
pub struct Persister {
    runtime: Arc<Runtime>,
}

impl Persister {
    /// Create a persister with its own background runtime
    ///
    /// The runtime has a single worker thread; saves are rare and short.
    pub fn new() -> Result<Self, ExpenseError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("expense-persister")
            .build()
            .map_err(ExpenseError::runtime_error)?;

        Ok(Persister {
            runtime: Arc::new(runtime),
        })
    }

    /// Schedule a save of `store` to `destination` and return immediately
    ///
    /// The returned handle carries a fresh [`CompletionSignal`] that the
    /// background task sets once the write has finished, successfully or
    /// not. The write itself truncates and rewrites `destination` exactly as
    /// [`RecordStore::save`] does.
    pub fn save_async(&self, store: &RecordStore, destination: &Path) -> SaveHandle {
        let signal = CompletionSignal::new();
        let snapshot: Arc<[Record]> = Arc::from(store.records());
        let destination = destination.to_path_buf();

        tracing::debug!(
            path = %destination.display(),
            count = snapshot.len(),
            "scheduling background save"
        );

        let task_signal = signal.clone();
        let task = self.runtime.spawn(async move {
            let result = write_snapshot(&snapshot, &destination).await;
            task_signal.complete();
            result
        });

        SaveHandle {
            signal,
            task,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

async fn write_snapshot(records: &[Record], destination: &Path) -> Result<usize, ExpenseError> {
    tokio::fs::write(destination, render_records(records)).await?;
    tracing::info!(path = %destination.display(), count = records.len(), "saved records");
    Ok(records.len())
}

/// Handle to one scheduled background save
#[derive(Debug)]
pub struct SaveHandle {
    signal: CompletionSignal,
    task: JoinHandle<Result<usize, ExpenseError>>,
    runtime: Arc<Runtime>,
}

impl SaveHandle {
    /// A clone of this save's completion signal
    pub fn signal(&self) -> CompletionSignal {
        self.signal.clone()
    }

    /// Whether the background write has finished
    pub fn is_complete(&self) -> bool {
        self.signal.is_complete()
    }

    /// Block until the save finishes, polling every `poll_interval`
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of records written
    /// * `Err(ExpenseError::Io)` - The write failed
    /// * `Err(ExpenseError::PersistFailed)` - The task died before signalling
    pub fn wait(self, poll_interval: Duration) -> Result<usize, ExpenseError> {
        while !self.signal.is_complete() {
            // A panicked task never sets the signal; stop polling once it is gone.
            if self.task.is_finished() {
                break;
            }
            std::thread::sleep(poll_interval);
        }

        match self.runtime.block_on(self.task) {
            Ok(result) => result,
            Err(e) => Err(ExpenseError::PersistFailed {
                message: e.to_string(),
            }),
        }
    }
}
