//! Text format handling for the expense storage file
//!
//! This module centralizes all storage format concerns, providing:
//! - Amount parsing and validation shared by user input and file loading
//! - Conversion from a storage line to a [`Record`]
//! - Record serialization, one `category amount` line per record
//!
//! All functions except [`write_records`] are pure (no I/O) for easy testing.

use crate::types::{Amount, ExpenseError, Record};
use std::io::Write;

/// Parse a raw amount typed by a user or read from storage
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected as
/// non-numeric since they cannot be summed meaningfully.
///
/// # Returns
///
/// * `Ok(amount)` - A finite, non-negative amount
/// * `Err(ExpenseError::ParseError)` - The text is not a number
/// * `Err(ExpenseError::RangeError)` - The number is negative
pub fn parse_amount(raw: &str) -> Result<Amount, ExpenseError> {
    let trimmed = raw.trim();
    let amount: Amount = trimmed
        .parse()
        .map_err(|_| ExpenseError::parse_error(trimmed))?;

    if !amount.is_finite() {
        return Err(ExpenseError::parse_error(trimmed));
    }
    if amount < 0.0 {
        return Err(ExpenseError::range_error(amount));
    }

    Ok(amount)
}

/// Convert one storage line into a record
///
/// A line must hold exactly two whitespace-separated fields: the category
/// and a valid amount.
///
/// # Returns
///
/// * `Ok(None)` - The line is blank
/// * `Ok(Some(record))` - The line holds a valid record
/// * `Err(String)` - The line is malformed; the message says why
pub fn parse_line(line: &str) -> Result<Option<Record>, String> {
    let mut fields = line.split_whitespace();

    let Some(category) = fields.next() else {
        return Ok(None);
    };
    let Some(raw_amount) = fields.next() else {
        return Err(format!("missing amount for category '{}'", category));
    };
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected field '{}' after amount", extra));
    }

    let amount = parse_amount(raw_amount).map_err(|e| e.to_string())?;
    Ok(Some(Record::new(category, amount)))
}

/// Format a record as a storage line (without the trailing newline)
pub fn format_record(record: &Record) -> String {
    format!("{} {}", record.category, record.amount)
}

/// Render all records into the full storage file contents
pub fn render_records(records: &[Record]) -> String {
    let mut contents = String::new();
    for record in records {
        contents.push_str(&format_record(record));
        contents.push('\n');
    }
    contents
}

/// Write records to output in storage format
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(ExpenseError::Io)` if a write error occurred
pub fn write_records(records: &[Record], output: &mut dyn Write) -> Result<(), ExpenseError> {
    output.write_all(render_records(records).as_bytes())?;
    output.flush()?;
    Ok(())
}
