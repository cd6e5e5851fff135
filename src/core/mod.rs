//! Core record functionality
//!
//! This module contains the generic typed record, the per-column
//! conversion rules, error types and line-oriented I/O helpers.

mod error;
mod field;
pub mod io;
mod record;

pub use error::{BedError, BedParseError, ParseResult, Result};
pub use field::{Field, TabFields};
pub use io::{
    create_writer, detect_compression, open_reader, CompressionFormat, FinishWrite, LineIterator,
    OutputWriter, DEFAULT_BUFFER_SIZE,
};
pub use record::{compare, dump, Column, Record, Schema};
