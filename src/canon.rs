//! The 66-book Protestant canon.
//!
//! Book identity throughout the crate is the 3-character code used by the
//! USFX source ("GEN", "1CO", ...). This module owns the canonical reading
//! order, membership checks and the `BookCode` newtype, plus the verse ID
//! string format shared by the extractor and the cross-reference linker.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::Serialize;
use thiserror::Error;

/// Canonical reading order, Genesis through Revelation.
pub static CANONICAL_ORDER: [&str; 66] = [
    // Old Testament
    "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT",
    "1SA", "2SA", "1KI", "2KI", "1CH", "2CH", "EZR", "NEH",
    "EST", "JOB", "PSA", "PRO", "ECC", "SNG", "ISA", "JER",
    "LAM", "EZK", "DAN", "HOS", "JOL", "AMO", "OBA", "JON",
    "MIC", "NAM", "HAB", "ZEP", "HAG", "ZEC", "MAL",
    // New Testament
    "MAT", "MRK", "LUK", "JHN", "ACT", "ROM", "1CO", "2CO",
    "GAL", "EPH", "PHP", "COL", "1TH", "2TH", "1TI", "2TI",
    "TIT", "PHM", "HEB", "JAS", "1PE", "2PE", "1JN", "2JN",
    "3JN", "JUD", "REV",
];

lazy_static! {
    static ref CANONICAL_POSITION: HashMap<&'static str, usize> = CANONICAL_ORDER
        .iter()
        .enumerate()
        .map(|(idx, code)| (*code, idx))
        .collect();
}

/// True when `code` is one of the 66 canonical book codes.
pub fn is_canonical(code: &str) -> bool {
    CANONICAL_POSITION.contains_key(code)
}

/// Zero-based position of `code` in reading order, None for unknown codes.
pub fn canonical_position(code: &str) -> Option<usize> {
    CANONICAL_POSITION.get(code).copied()
}

/// A validated canonical book code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BookCode(String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Not a canonical book code: {0}")]
pub struct ParseBookCodeError(String);

impl FromStr for BookCode {
    type Err = ParseBookCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_canonical(s) {
            Ok(BookCode(s.to_string()))
        } else {
            Err(ParseBookCodeError(s.to_string()))
        }
    }
}

impl BookCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in reading order. Codes only exist in validated form, so
    /// this always resolves.
    pub fn position(&self) -> usize {
        canonical_position(&self.0).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for BookCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format a verse identifier, e.g. "GEN 1:1".
///
/// Chapter and verse pass through as given. The extractor supplies parsed
/// numbers, the citation normalizer supplies the digit substrings it
/// captured, so "01" stays "01" there.
pub fn verse_id(code: &str, chapter: impl fmt::Display, verse: impl fmt::Display) -> String {
    format!("{} {}:{}", code, chapter, verse)
}
