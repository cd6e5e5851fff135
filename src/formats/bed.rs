//! BED format adapter
//!
//! Named BED3..BED12 schemas on top of the generic [`Record`], plus a
//! streaming [`Reader`] and a [`Writer`] for whole files.
//!
//! Column types of the full schema, in order: text, integer, integer, text,
//! integer, character, integer, integer, text, integer, text, text. The
//! itemRgb, blockSizes and blockStarts columns stay plain text.

use crate::core::{open_reader, BedError, FinishWrite, LineIterator, Record, Result, Schema};
use std::io::{self, BufRead, Write};
use std::marker::PhantomData;
use std::path::Path;

/// Column indices of the BED format, for use with `Record::get`
///
/// ```
/// use bedtuple::formats::bed::{column, Bed3};
///
/// let record = Bed3::parse("chr1\t10\t20").unwrap();
/// assert_eq!(*record.get::<{ column::END }>(), 20);
/// ```
pub mod column {
    pub const CHROM: usize = 0;
    pub const START: usize = 1;
    pub const END: usize = 2;
    pub const NAME: usize = 3;
    pub const SCORE: usize = 4;
    pub const STRAND: usize = 5;
    pub const THICK_START: usize = 6;
    pub const THICK_END: usize = 7;
    pub const ITEM_RGB: usize = 8;
    pub const BLOCK_COUNT: usize = 9;
    pub const BLOCK_SIZES: usize = 10;
    pub const BLOCK_STARTS: usize = 11;
}

pub type Bed3Columns = (String, i32, i32);
pub type Bed4Columns = (String, i32, i32, String);
pub type Bed5Columns = (String, i32, i32, String, i32);
pub type Bed6Columns = (String, i32, i32, String, i32, char);
pub type Bed8Columns = (String, i32, i32, String, i32, char, i32, i32);
pub type Bed9Columns = (String, i32, i32, String, i32, char, i32, i32, String);
pub type Bed12Columns = (
    String,
    i32,
    i32,
    String,
    i32,
    char,
    i32,
    i32,
    String,
    i32,
    String,
    String,
);

pub type Bed3 = Record<Bed3Columns>;
pub type Bed4 = Record<Bed4Columns>;
pub type Bed5 = Record<Bed5Columns>;
pub type Bed6 = Record<Bed6Columns>;
pub type Bed8 = Record<Bed8Columns>;
pub type Bed9 = Record<Bed9Columns>;
pub type Bed12 = Record<Bed12Columns>;

/// Whether a line is a comment, `track` or `browser` line rather than a record
pub fn is_header_line(line: &str) -> bool {
    if line.starts_with('#') {
        return true;
    }
    matches!(
        line.split(|c: char| c == ' ' || c == '\t').next(),
        Some("track") | Some("browser")
    )
}

/// Reading statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadStats {
    /// Data lines seen (headers and blank lines excluded)
    pub total: usize,
    pub parsed: usize,
    pub failed: usize,
}

/// Streaming reader yielding one typed record per data line
///
/// Blank lines are skipped and header lines are collected in
/// [`Reader::headers`]. A malformed line yields an error carrying its
/// 1-based line number; reading may continue with the next line.
///
/// Header classification ignores the schema: any line starting with `#`, or
/// whose first space- or tab-separated word is `track` or `browser`, goes to
/// the headers even when it would parse as a record (`track\t1\t2` under
/// BED3). Such lines are never counted in [`ReadStats`].
pub struct Reader<R: BufRead, T = Bed3Columns> {
    lines: LineIterator<R>,
    line_number: usize,
    headers: Vec<String>,
    stats: ReadStats,
    _schema: PhantomData<fn() -> T>,
}

impl<R: BufRead, T: Schema> Reader<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineIterator::new(reader),
            line_number: 0,
            headers: Vec::new(),
            stats: ReadStats::default(),
            _schema: PhantomData,
        }
    }

    /// Read the next record
    /// Returns None at end of input
    pub fn read_record(&mut self) -> Option<Result<Record<T>>> {
        loop {
            let line = match self.lines.next_line()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if line.is_empty() {
                continue;
            }
            if is_header_line(line) {
                log::trace!("Header at line {}: {}", self.line_number, line);
                self.headers.push(line.to_owned());
                continue;
            }

            self.stats.total += 1;
            return Some(match Record::parse(line) {
                Ok(record) => {
                    self.stats.parsed += 1;
                    Ok(record)
                }
                Err(source) => {
                    self.stats.failed += 1;
                    Err(BedError::Parse {
                        line: self.line_number,
                        source,
                    })
                }
            });
        }
    }

    /// Header lines seen so far, in input order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of the last line read (1-based)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}

impl<T: Schema> Reader<Box<dyn BufRead>, T> {
    /// Open a plain, gzip or bzip2 file (`-` for stdin)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(open_reader(path)?))
    }
}

impl<R: BufRead, T: Schema> Iterator for Reader<R, T> {
    type Item = Result<Record<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record()
    }
}

/// Collect every record of a stream, stopping at the first error
pub fn read_all<R: BufRead, T: Schema>(reader: R) -> Result<Vec<Record<T>>> {
    Reader::new(reader).collect()
}

/// Writer emitting one record per line
pub struct Writer<W: Write> {
    inner: W,
    buffer: String,
    written: usize,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: String::with_capacity(256),
            written: 0,
        }
    }

    /// Write a header line verbatim
    pub fn write_header(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    pub fn write_record<T: Schema>(&mut self, record: &Record<T>) -> io::Result<()> {
        self.buffer.clear();
        record.write_text(&mut self.buffer);
        self.buffer.push('\n');
        self.inner.write_all(self.buffer.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all_records<'a, T, I>(&mut self, records: I) -> io::Result<()>
    where
        T: Schema + 'a,
        I: IntoIterator<Item = &'a Record<T>>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

}

impl<W: FinishWrite> Writer<W> {
    /// Complete the output (gzip trailer included) and return the sink
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.finish_write()?;
        Ok(self.inner)
    }
}
