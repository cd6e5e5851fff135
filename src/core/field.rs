//! Column conversion rules
//!
//! Every column type of a record schema implements [`Field`], which knows how
//! to turn one tab-separated token into a value and back.

use super::error::{BedParseError, ParseResult};
use memchr::Memchr;

/// A value that can occupy one column of a record
pub trait Field: Sized {
    /// Convert a raw token into a column value
    fn parse_field(token: &str, column_index: usize) -> ParseResult<Self>;

    /// Append the canonical text form of the value
    fn write_field(&self, out: &mut String);
}

impl Field for String {
    #[inline]
    fn parse_field(token: &str, _column_index: usize) -> ParseResult<Self> {
        Ok(token.to_owned())
    }

    #[inline]
    fn write_field(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Field for char {
    fn parse_field(token: &str, column_index: usize) -> ParseResult<Self> {
        token
            .chars()
            .next()
            .ok_or_else(|| BedParseError::MalformedField {
                column_index,
                raw_token: token.to_owned(),
            })
    }

    #[inline]
    fn write_field(&self, out: &mut String) {
        out.push(*self);
    }
}

/// Integer columns accept an optional sign and leading zeros, and always
/// write the canonical base-10 form. `+5`, `007` and `-0` therefore parse to
/// 5, 7 and 0 and come back as `5`, `7` and `0`: text round-trips are exact
/// only for canonical tokens.
macro_rules! impl_integer_field {
    ($($int:ty),+) => {
        $(
            impl Field for $int {
                fn parse_field(token: &str, column_index: usize) -> ParseResult<Self> {
                    token
                        .parse::<$int>()
                        .map_err(|_| BedParseError::MalformedField {
                            column_index,
                            raw_token: token.to_owned(),
                        })
                }

                #[inline]
                fn write_field(&self, out: &mut String) {
                    out.push_str(&self.to_string());
                }
            }
        )+
    };
}

impl_integer_field!(i32, i64);

/// Iterator over the tab-separated tokens of a line
///
/// Yields `n + 1` tokens for a line holding `n` tabs, so an empty line is a
/// single empty token.
pub struct TabFields<'a> {
    line: &'a str,
    tabs: Memchr<'a>,
    start: usize,
    done: bool,
}

impl<'a> TabFields<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            tabs: Memchr::new(b'\t', line.as_bytes()),
            start: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for TabFields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        match self.tabs.next() {
            Some(tab) => {
                let token = &self.line[self.start..tab];
                self.start = tab + 1;
                Some(token)
            }
            None => {
                self.done = true;
                Some(&self.line[self.start..])
            }
        }
    }
}
