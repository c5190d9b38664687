//! Storage file reader with iterator interface
//!
//! Provides a streaming iterator over records from the storage file.
//! Delegates line format concerns to the text_format module.
//!
//! # Truncating Semantics
//!
//! Reading stops at the first malformed line: that line and everything after
//! it are ignored, and the iterator is fused from then on. A line that is not
//! valid UTF-8 counts as malformed. Blank lines are skipped. The reason reading stopped is kept and can be inspected with
//! [`RecordReader::stopped_at`].
//!
//! ```no_run
//! use expense_tracker::io::record_reader::RecordReader;
//! use std::path::Path;
//!
//! let reader = RecordReader::open(Path::new("expenses.txt")).unwrap();
//! for record in reader {
//!     println!("{}", record.unwrap());
//! }
//! ```

use crate::io::text_format::parse_line;
use crate::types::{ExpenseError, Record};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Where and why a [`RecordReader`] stopped before the end of its input
#[derive(Debug, Clone, PartialEq)]
pub struct Truncation {
    /// 1-based line number of the first malformed line
    pub line: usize,
    /// Description of what was wrong with it
    pub reason: String,
}

/// Streaming reader over storage lines
///
/// Yields `Result<Record, ExpenseError>`; errors are only I/O failures.
/// Malformed content ends iteration instead of producing an error.
#[derive(Debug)]
pub struct RecordReader<R: BufRead> {
    source: R,
    buf: Vec<u8>,
    line_num: usize,
    stopped_at: Option<Truncation>,
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a storage file for reading
    ///
    /// # Returns
    ///
    /// * `Ok(RecordReader)` if the file opened successfully
    /// * `Err(std::io::Error)` otherwise, so callers can tell a missing file
    ///   (`ErrorKind::NotFound`) from other failures
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::with_capacity(8 * 1024, file)))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader over any buffered source
    pub fn new(source: R) -> Self {
        Self {
            source,
            buf: Vec::new(),
            line_num: 0,
            stopped_at: None,
            done: false,
        }
    }

    /// The malformed line that ended reading, if any
    pub fn stopped_at(&self) -> Option<&Truncation> {
        self.stopped_at.as_ref()
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, ExpenseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.source.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line_num += 1;

            let parsed = match std::str::from_utf8(strip_line_ending(&self.buf)) {
                Ok(line) => parse_line(line),
                Err(e) => Err(format!("line is not valid UTF-8 ({})", e)),
            };

            match parsed {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(reason) => {
                    self.done = true;
                    self.stopped_at = Some(Truncation {
                        line: self.line_num,
                        reason,
                    });
                }
            }
        }
        None
    }
}

/// Drop a trailing `\n` or `\r\n`
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
