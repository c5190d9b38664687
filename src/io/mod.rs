//! I/O module
//!
//! Handles the storage file format.
//!
//! # Components
//!
//! - `text_format` - line format handling (amount parsing, record conversion, serialization)
//! - `record_reader` - storage reader with a truncating iterator interface

pub mod record_reader;
pub mod text_format;

pub use record_reader::{RecordReader, Truncation};
pub use text_format::{format_record, parse_amount, parse_line, render_records, write_records};
