//! Interactive expense session
//!
//! Drives one console session end to end:
//!
//! 1. Load the store from the storage file (or start empty)
//! 2. Read category/amount pairs until `DONE`, answering `SEARCH` lookups
//! 3. List the recorded expenses and print the parallel total
//! 4. Save in the background and wait for the completion signal
//!
//! Input and output are generic so the whole loop can be scripted in tests.
//! Invalid amounts and an empty total end the session early: the error is
//! printed and nothing is saved.

use crate::core::{Persister, RecordStore, StoreOrigin, DEFAULT_POLL_INTERVAL};
use crate::strategy::ReductionStrategy;
use crate::types::{Amount, ExpenseError};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Category input that ends the entry loop
pub const DONE_COMMAND: &str = "DONE";

/// Category input that starts a category lookup
pub const SEARCH_COMMAND: &str = "SEARCH";

/// Session settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Storage file to load from and save to
    pub storage_path: PathBuf,
    /// Interval between save completion checks
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("expenses.txt"),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Total reported and records saved
    Saved {
        /// Total of all records
        total: Amount,
        /// Number of records written to storage
        records: usize,
    },
    /// A user error ended the session; nothing was saved
    Aborted(ExpenseError),
}

/// One interactive session over a record store
pub struct Session {
    store: RecordStore,
    origin: StoreOrigin,
    reducer: Box<dyn ReductionStrategy>,
    persister: Persister,
    config: SessionConfig,
}

impl Session {
    /// Open a session, loading the store from the configured storage file
    ///
    /// A missing or unreadable storage file starts an empty session.
    pub fn open(
        config: SessionConfig,
        reducer: Box<dyn ReductionStrategy>,
        persister: Persister,
    ) -> Self {
        let (store, origin) = RecordStore::open(&config.storage_path);
        Self {
            store,
            origin,
            reducer,
            persister,
            config,
        }
    }

    /// The session's record store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run the session to completion
    ///
    /// # Returns
    ///
    /// * `Ok(SessionOutcome::Saved)` - Total printed and records saved
    /// * `Ok(SessionOutcome::Aborted)` - A user error was printed, nothing saved
    /// * `Err(ExpenseError)` - Console I/O, a reducer worker or the save failed
    pub fn run<R: BufRead>(
        mut self,
        mut input: R,
        output: &mut dyn Write,
    ) -> Result<SessionOutcome, ExpenseError> {
        self.greet(output)?;

        let total = match self.record_and_total(&mut input, output) {
            Ok(total) => total,
            Err(e) if e.is_user_error() => {
                writeln!(output, "{}", e)?;
                tracing::debug!(error = %e, "session aborted");
                return Ok(SessionOutcome::Aborted(e));
            }
            Err(e) => return Err(e),
        };

        let path = &self.config.storage_path;
        let handle = self.persister.save_async(&self.store, path);
        writeln!(output, "Expenses are being saved in the background.")?;
        output.flush()?;

        let records = handle.wait(self.config.poll_interval)?;
        writeln!(output, "Expenses saved to '{}'.", path.display())?;
        writeln!(output, "\nGreat job on staying on top of your finances!")?;

        Ok(SessionOutcome::Saved { total, records })
    }

    fn greet(&self, output: &mut dyn Write) -> Result<(), ExpenseError> {
        writeln!(
            output,
            "Personal Expense Tracker to keep you organized and well-balanced!"
        )?;
        writeln!(
            output,
            "Log your expenses by categorizing them and adding the amount. \
             Type '{}' when ready for a summary.\n",
            DONE_COMMAND
        )?;

        match self.origin {
            StoreOrigin::Resumed => writeln!(
                output,
                "Welcome back! Loaded {} expenses from '{}'. Continue to add below:",
                self.store.len(),
                self.config.storage_path.display()
            )?,
            StoreOrigin::Fresh => {
                writeln!(output, "No existing expense file found. Starting fresh.")?
            }
        }
        Ok(())
    }

    /// Entry loop, listing and total; user errors propagate to `run`
    fn record_and_total<R: BufRead>(
        &mut self,
        input: &mut R,
        output: &mut dyn Write,
    ) -> Result<Amount, ExpenseError> {
        loop {
            write!(
                output,
                "\nEnter an expense category (or type '{}' to look up a category. \
                 Otherwise '{}' to finish): ",
                SEARCH_COMMAND, DONE_COMMAND
            )?;
            output.flush()?;

            // End of input finishes entry like DONE.
            let Some(category) = read_line(input)? else {
                break;
            };

            match category.as_str() {
                DONE_COMMAND => break,
                SEARCH_COMMAND => {
                    write!(output, "Enter category to search: ")?;
                    output.flush()?;
                    let Some(query) = read_line(input)? else {
                        break;
                    };
                    self.search(&query, output)?;
                    continue;
                }
                "" => {
                    writeln!(output, "Category cannot be empty.")?;
                    continue;
                }
                // Storage lines are whitespace-separated.
                _ if category.contains(char::is_whitespace) => {
                    writeln!(output, "Category names cannot contain spaces.")?;
                    continue;
                }
                _ => {}
            }

            write!(output, "Enter the amount spent on {}: $", category)?;
            output.flush()?;
            let Some(raw_amount) = read_line(input)? else {
                break;
            };

            let record = self.store.append(&category, &raw_amount)?;
            writeln!(
                output,
                "Added expense: {} - ${}",
                record.category, record.amount
            )?;
        }

        self.list(output)?;

        let total = self.reducer.total(self.store.records())?;
        writeln!(output, "\nTotal spending: ${:.2}", total)?;
        Ok(total)
    }

    fn search(&self, category: &str, output: &mut dyn Write) -> Result<(), ExpenseError> {
        let found = self.store.find_by_category(category);
        if found.is_empty() {
            writeln!(output, "No expenses found in category: {}", category)?;
        }
        for record in found {
            writeln!(output, "{}", record)?;
        }
        Ok(())
    }

    fn list(&self, output: &mut dyn Write) -> Result<(), ExpenseError> {
        if self.store.is_empty() {
            writeln!(output, "No expenses recorded yet.")?;
            return Ok(());
        }

        writeln!(output, "\nRecorded Expenses:")?;
        for record in self.store.records() {
            writeln!(output, "{}", record)?;
        }
        Ok(())
    }
}

/// Read one trimmed line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
