//! Verse text extraction from parsed USFX books
//!
//! Walks each canonical book's child sequence, tracking the open chapter
//! across children and an open verse within each block. Verse text
//! accumulates from marker tails and word-level elements; a buffer is
//! flushed when the next verse starts or the current one ends, and text
//! still buffered when a block closes is dropped.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use anyhow::{bail, Result};
use lazy_static::lazy_static;
use regex::Regex;

use crate::canon::{self, BookCode};
use crate::logger;
use crate::usfx::types::{BookChild, BookElement, BookMeta, InlineKind};

lazy_static! {
    static ref RE_SPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse whitespace runs to single spaces and trim the ends.
/// "  In   the\n\tbeginning " => "In the beginning"
pub fn clean_verse_text(text: &str) -> String {
    RE_SPACES.replace_all(text, " ").trim().to_string()
}

/// Map of verse ID ("GEN 1:1") to cleaned verse text, ordered by key.
pub type VerseText = BTreeMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct ExtractStats {
    pub books_processed: usize,
    pub verses_extracted: usize,
    pub warnings: usize,
}

/// Everything the extractor produces from one USFX document.
#[derive(Debug)]
pub struct Extraction {
    /// Book metadata in canonical reading order.
    pub meta: Vec<BookMeta>,
    pub verse_text: VerseText,
    pub stats: ExtractStats,
}

/// Extract chapter metadata and verse text from parsed book elements.
///
/// Non-canonical book elements are skipped. Books that end up with no
/// chapter data are dropped with a warning; an extraction with no books at
/// all is an error. The resulting metadata is sorted into canonical
/// reading order regardless of document order.
pub fn extract_books(
    books: &[BookElement],
    display_names: &HashMap<String, String>,
) -> Result<Extraction> {
    let mut meta: Vec<BookMeta> = Vec::new();
    let mut verse_text: VerseText = BTreeMap::new();
    let mut stats = ExtractStats::default();

    for book in books {
        if !canon::is_canonical(&book.code) {
            logger::debug(&format!("Skipping non-canonical book element: '{}'", book.code));
            continue;
        }

        let code = BookCode::from_str(&book.code)?;
        let display_name = display_names
            .get(code.as_str())
            .cloned()
            .unwrap_or_else(|| book.code.clone());

        logger::info(&format!("Processing book {} ({})", code, display_name));

        let mut chapters: Vec<u32> = Vec::new();
        // 0 means no chapter is open; verse content before the first
        // chapter milestone is ignored.
        let mut chapter_num: u32 = 0;
        let mut max_verse: u32 = 0;

        for child in &book.children {
            match child {
                BookChild::Chapter { id } => {
                    if chapter_num > 0 {
                        if max_verse > 0 {
                            chapters.push(max_verse);
                        } else {
                            logger::warn(&format!(
                                "Chapter {} of {} closed with no verses",
                                chapter_num, code
                            ));
                            stats.warnings += 1;
                            chapters.push(0);
                        }
                    }

                    match id.as_deref().and_then(|s| s.trim().parse::<u32>().ok()) {
                        Some(n) => {
                            chapter_num = n;
                            max_verse = 0;
                        }
                        None => {
                            logger::warn(&format!(
                                "Invalid chapter id {:?} in book {}, keeping {} completed chapters",
                                id,
                                code,
                                chapters.len()
                            ));
                            stats.warnings += 1;
                            chapter_num = 0;
                            break;
                        }
                    }
                }
                BookChild::Block { nodes } => {
                    if chapter_num == 0 {
                        continue;
                    }

                    // The verse cursor does not survive block boundaries.
                    let mut collecting: u32 = 0;
                    let mut buffer = String::new();

                    for node in nodes {
                        match node.kind {
                            InlineKind::VerseStart => {
                                match node.id.as_deref().and_then(|s| s.trim().parse::<u32>().ok()) {
                                    Some(n) => {
                                        if collecting > 0 {
                                            flush_verse(
                                                &mut verse_text,
                                                &code,
                                                chapter_num,
                                                collecting,
                                                &buffer,
                                            );
                                        }
                                        collecting = n;
                                        buffer.clear();
                                        if n > max_verse {
                                            max_verse = n;
                                        }
                                    }
                                    None => {
                                        logger::warn(&format!(
                                            "Invalid verse id {:?} in {} chapter {}",
                                            node.id, code, chapter_num
                                        ));
                                        stats.warnings += 1;
                                        collecting = 0;
                                    }
                                }
                                if collecting > 0 && !node.tail.is_empty() {
                                    buffer.push_str(node.tail.trim());
                                    buffer.push(' ');
                                }
                            }
                            InlineKind::VerseEnd => {
                                if collecting > 0 {
                                    flush_verse(
                                        &mut verse_text,
                                        &code,
                                        chapter_num,
                                        collecting,
                                        &buffer,
                                    );
                                }
                                collecting = 0;
                                buffer.clear();
                            }
                            InlineKind::Word | InlineKind::Char => {
                                if collecting > 0 {
                                    let text = node.text.trim();
                                    if !text.is_empty() {
                                        buffer.push_str(text);
                                        buffer.push(' ');
                                    }
                                    if !node.tail.is_empty() {
                                        buffer.push_str(node.tail.trim());
                                        buffer.push(' ');
                                    }
                                }
                            }
                            InlineKind::Ref | InlineKind::BookName => {
                                if collecting > 0 && !node.tail.is_empty() {
                                    buffer.push_str(node.tail.trim());
                                    buffer.push(' ');
                                }
                            }
                            InlineKind::Other => {}
                        }
                    }
                }
            }
        }

        if chapter_num > 0 {
            if max_verse > 0 {
                chapters.push(max_verse);
            } else {
                logger::warn(&format!(
                    "Chapter {} of {} closed with no verses",
                    chapter_num, code
                ));
                stats.warnings += 1;
                chapters.push(0);
            }
        }

        if chapters.is_empty() {
            logger::warn(&format!("No chapter data for book {}, dropping it", code));
            stats.warnings += 1;
            continue;
        }

        meta.push(BookMeta {
            book_name: display_name,
            book_abbr: code,
            chapters,
        });
        stats.books_processed += 1;
    }

    if meta.is_empty() {
        bail!("No canonical book data extracted from USFX document");
    }

    if meta.len() != canon::CANONICAL_ORDER.len() {
        logger::warn(&format!(
            "Expected {} canonical books, extracted {}",
            canon::CANONICAL_ORDER.len(),
            meta.len()
        ));
    }

    meta.sort_by_key(|m| m.book_abbr.position());
    stats.verses_extracted = verse_text.len();

    Ok(Extraction {
        meta,
        verse_text,
        stats,
    })
}

/// Clean and store one verse. Verses that clean to an empty string are not
/// recorded. A later flush for the same verse ID replaces the earlier one.
fn flush_verse(verse_text: &mut VerseText, code: &BookCode, chapter: u32, verse: u32, raw: &str) {
    let cleaned = clean_verse_text(raw);
    if !cleaned.is_empty() {
        verse_text.insert(canon::verse_id(code.as_str(), chapter, verse), cleaned);
    }
}
