//! File format adapters
//!
//! Named BED schemas with a streaming reader and a buffered writer.

pub mod bed;

pub use bed::{
    read_all, Bed12, Bed12Columns, Bed3, Bed3Columns, Bed4, Bed4Columns, Bed5, Bed5Columns, Bed6,
    Bed6Columns, Bed8, Bed8Columns, Bed9, Bed9Columns, ReadStats, Reader, Writer,
};
