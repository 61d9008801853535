//! Citation standardization for the cross-reference list
//!
//! Turns citation tokens like "Gen.1.1", "1 Cor.3.16" or "Rom 8.28-30"
//! into the verse ID format the extractor produces ("GEN 1:1"). Ranges
//! collapse to their starting verse.

use lazy_static::lazy_static;
use regex::Regex;

use crate::canon;
use crate::crossref::abbrev;
use crate::logger;

lazy_static! {
    // Gen.1.1; Ps 23.1; 1 Cor.3.16; Rom 8.28-30; Gen.1.1-Gen.2.3
    //
    // Captures the book token, chapter and first verse. A trailing range
    // (a bare verse number or a second book.chapter.verse) is allowed so
    // the token still parses, then discarded.
    static ref RE_CITATION: Regex = Regex::new(
        r"^\s*(\d*\s*[a-zA-Z]+)\.?\s*(\d+)\.(\d+)(?:-\s*(?:\d+|[a-zA-Z]+\.?\s*\d+\.\d+))?\s*$"
    ).unwrap();
}

const DEFAULT_REPORT_LIMIT: usize = 30;

/// Bounded sink for standardization failure reports.
///
/// Large cross-reference lists fail in bulk when something is off with the
/// abbreviation table, so only the first `limit` failures are reported at
/// debug level. The total keeps counting.
#[derive(Debug)]
pub struct RefDiagnostics {
    enabled: bool,
    limit: usize,
    failures: usize,
}

impl RefDiagnostics {
    pub fn new() -> Self {
        RefDiagnostics {
            enabled: true,
            limit: DEFAULT_REPORT_LIMIT,
            failures: 0,
        }
    }

    pub fn disabled() -> Self {
        RefDiagnostics {
            enabled: false,
            limit: 0,
            failures: 0,
        }
    }

    /// Number of failures seen so far, reported or not.
    pub fn failures(&self) -> usize {
        self.failures
    }

    fn report(&mut self, msg: impl FnOnce() -> String) {
        if self.enabled && self.failures < self.limit {
            logger::debug(&msg());
        }
        self.failures += 1;
    }
}

impl Default for RefDiagnostics {
    fn default() -> Self {
        RefDiagnostics::new()
    }
}

/// Standardize one citation token into a verse ID, e.g. "Gen.1.1" to
/// "GEN 1:1".
///
/// The book token is resolved through the abbreviation table first, then
/// matched directly against the canonical codes, case-sensitively and then
/// upper-cased. Returns None when the token does not parse or the book
/// cannot be resolved to a canonical code.
pub fn standardize_citation(token: &str, diagnostics: &mut RefDiagnostics) -> Option<String> {
    let caps = match RE_CITATION.captures(token) {
        Some(caps) => caps,
        None => {
            diagnostics.report(|| format!("Citation did not match the reference pattern: '{}'", token));
            return None;
        }
    };

    let book_part = caps[1].trim().to_string();
    let chapter = &caps[2];
    let verse = &caps[3];

    if let Some(code) = abbreviation_lookup(&book_part) {
        return Some(canon::verse_id(code, chapter, verse));
    }

    if canon::is_canonical(&book_part) {
        return Some(canon::verse_id(&book_part, chapter, verse));
    }

    let upper = book_part.to_uppercase();
    if canon::is_canonical(&upper) {
        return Some(canon::verse_id(&upper, chapter, verse));
    }

    diagnostics.report(|| {
        format!(
            "Could not resolve book token '{}' in citation '{}'",
            book_part, token
        )
    });
    None
}

/// Abbreviation table hit, accepted only when the mapped code is canonical.
fn abbreviation_lookup(book_part: &str) -> Option<&'static str> {
    abbrev::abbreviation_to_code(book_part).filter(|code| canon::is_canonical(code))
}
