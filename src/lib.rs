//! bedtuple - generic typed BED records
//!
//! Reads and writes tab-separated genomic interval records whose column
//! count and column types are fixed by a tuple type chosen at the call site.
//!
//! # Features
//!
//! - Any schema of 1 to 16 columns built from text, integer and character fields
//! - Compile-time checked column access with `get::<N>()`
//! - Explicit `MissingField`/`MalformedField` errors instead of silent defaults
//! - Transparent gzip/bzip2 input
//!
//! # Example
//!
//! ```
//! use bedtuple::formats::bed::{column, Bed6};
//!
//! let record = Bed6::parse("chr1\t1000\t2000\tgene1\t500\t+").unwrap();
//! assert_eq!(*record.get::<{ column::STRAND }>(), '+');
//! assert_eq!(record.to_text(), "chr1\t1000\t2000\tgene1\t500\t+");
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{compare, dump, BedError, BedParseError, Column, Field, Record, Schema};
pub use formats::bed;
