//! Generic typed BED record
//!
//! A [`Record`] wraps a tuple whose element types define the schema: the
//! number of columns and the conversion rule of each one. Parsing walks the
//! tuple left to right, pulling one tab-separated token per column, and
//! serialization walks it again joining the rendered columns with tabs.
//!
//! ```
//! use bedtuple::core::Record;
//!
//! let record: Record<(String, i32, i32)> = Record::parse("chr1\t100\t200").unwrap();
//! assert_eq!(record.get::<1>(), &100);
//! assert_eq!(record.to_text(), "chr1\t100\t200");
//! ```

use super::error::{BedParseError, ParseResult};
use super::field::{Field, TabFields};
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// A tuple of [`Field`] values usable as a record schema
pub trait Schema: Sized {
    /// Number of columns in the schema
    const COLUMNS: usize;

    /// Build the tuple from tokens, one per column, in order.
    /// Tokens left over after the last column are not consumed.
    fn parse_columns<'a, Tokens>(tokens: Tokens) -> ParseResult<Self>
    where
        Tokens: Iterator<Item = &'a str>;

    /// Append all columns separated by tabs, without a trailing tab
    fn write_columns(&self, out: &mut String);
}

/// Typed access to column `N` of a schema
///
/// Only implemented for indices inside the tuple, so an out-of-range
/// `get::<N>()` does not compile.
pub trait Column<const N: usize> {
    type Output;

    fn column(&self) -> &Self::Output;

    fn column_mut(&mut self) -> &mut Self::Output;
}

macro_rules! impl_column {
    ([$($G:ident)+]; $T:ident $idx:tt) => {
        impl<$($G: Field),+> Column<$idx> for ($($G,)+) {
            type Output = $T;

            #[inline]
            fn column(&self) -> &$T {
                &self.$idx
            }

            #[inline]
            fn column_mut(&mut self) -> &mut $T {
                &mut self.$idx
            }
        }
    };
}

macro_rules! impl_columns {
    ($all:tt; $($T:ident $idx:tt),+) => {
        $(
            impl_column!($all; $T $idx);
        )+
    };
}

macro_rules! impl_schema {
    ($len:expr; $T0:ident $i0:tt $(, $T:ident $idx:tt)*) => {
        impl<$T0: Field $(, $T: Field)*> Schema for ($T0, $($T,)*) {
            const COLUMNS: usize = $len;

            fn parse_columns<'a, Tokens>(mut tokens: Tokens) -> ParseResult<Self>
            where
                Tokens: Iterator<Item = &'a str>,
            {
                Ok((
                    {
                        let token = tokens
                            .next()
                            .ok_or(BedParseError::MissingField { column_index: $i0 })?;
                        <$T0 as Field>::parse_field(token, $i0)?
                    },
                    $(
                        {
                            let token = tokens
                                .next()
                                .ok_or(BedParseError::MissingField { column_index: $idx })?;
                            <$T as Field>::parse_field(token, $idx)?
                        },
                    )*
                ))
            }

            fn write_columns(&self, out: &mut String) {
                self.$i0.write_field(out);
                $(
                    out.push('\t');
                    self.$idx.write_field(out);
                )*
            }
        }

        impl_columns!([$T0 $($T)*]; $T0 $i0 $(, $T $idx)*);
    };
}

impl_schema!(1; A 0);
impl_schema!(2; A 0, B 1);
impl_schema!(3; A 0, B 1, C 2);
impl_schema!(4; A 0, B 1, C 2, D 3);
impl_schema!(5; A 0, B 1, C 2, D 3, E 4);
impl_schema!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_schema!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_schema!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_schema!(9; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
impl_schema!(10; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
impl_schema!(11; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
impl_schema!(12; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
impl_schema!(13; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12);
impl_schema!(14; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13);
impl_schema!(15; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14);
impl_schema!(16; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11, M 12, N 13, O 14, P 15);

/// One BED entry stored as a typed tuple
///
/// The default schema is `(chrom, start, end)`. Ordering compares columns
/// left to right with each column type's natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record<T = (String, i32, i32)> {
    data: T,
}

impl<T: Schema> Record<T> {
    /// Number of columns of this record type
    pub const COLUMNS: usize = T::COLUMNS;

    /// Create a record taking ownership of the column values
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Create a record with every column at its default value
    pub fn empty() -> Self
    where
        T: Default,
    {
        Self::default()
    }

    /// Parse one line (without its line terminator)
    ///
    /// Extra tokens after the last column are ignored.
    pub fn parse(line: &str) -> ParseResult<Self> {
        T::parse_columns(TabFields::new(line)).map(Self::new)
    }

    /// Value of column `N`
    #[inline]
    pub fn get<const N: usize>(&self) -> &<T as Column<N>>::Output
    where
        T: Column<N>,
    {
        self.data.column()
    }

    #[inline]
    pub fn get_mut<const N: usize>(&mut self) -> &mut <T as Column<N>>::Output
    where
        T: Column<N>,
    {
        self.data.column_mut()
    }

    /// Replace column `N`, returning the previous value
    pub fn set<const N: usize>(
        &mut self,
        value: <T as Column<N>>::Output,
    ) -> <T as Column<N>>::Output
    where
        T: Column<N>,
    {
        std::mem::replace(self.data.column_mut(), value)
    }

    pub fn as_tuple(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    /// Tab-joined text of all columns, no trailing tab or newline
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(64);
        self.write_text(&mut out);
        out
    }

    /// Append the tab-joined text of all columns to `out`
    pub fn write_text(&self, out: &mut String) {
        self.data.write_columns(out);
    }

    /// Write every record followed by a newline, in order
    pub fn dump<W: Write>(sink: &mut W, records: &[Self]) -> io::Result<()> {
        dump(sink, records)
    }
}

impl<T: Schema> From<T> for Record<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Schema> FromStr for Record<T> {
    type Err = BedParseError;

    fn from_str(line: &str) -> ParseResult<Self> {
        Self::parse(line)
    }
}

impl<T: Schema> fmt::Display for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Lexicographic comparison over columns
#[inline]
pub fn compare<T: Ord>(a: &Record<T>, b: &Record<T>) -> Ordering {
    a.cmp(b)
}

/// Write each record's text followed by `\n` to `sink`
pub fn dump<W: Write, T: Schema>(sink: &mut W, records: &[Record<T>]) -> io::Result<()> {
    let mut out = String::with_capacity(records.len() * 64);
    for record in records {
        record.write_text(&mut out);
        out.push('\n');
    }
    sink.write_all(out.as_bytes())
}
