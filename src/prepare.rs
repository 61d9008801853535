//! Pipeline orchestration
//!
//! Runs the full preparation: load book names, parse the USFX document,
//! extract metadata and verse text, write the text artifacts, then link and
//! write the cross-reference graph. Artifacts of completed stages stay on
//! disk even when a later stage fails.

use std::fs;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::artifacts;
use crate::book_names;
use crate::config::PrepConfig;
use crate::crossref::{self, LinkStats, RefDiagnostics};
use crate::logger;
use crate::usfx::{self, ExtractStats};

#[derive(Debug)]
pub struct PrepSummary {
    pub extract_stats: ExtractStats,
    pub link_stats: LinkStats,
}

/// Run the whole preparation pipeline with the given paths.
pub fn run(config: &PrepConfig) -> Result<PrepSummary> {
    let start_time: DateTime<Local> = Local::now();

    logger::info("=== Bible data preparation started ===");
    logger::info(&format!("Book names source: {}", config.book_names.display()));
    logger::info(&format!("USFX source:       {}", config.usfx.display()));
    logger::info(&format!("CrossRef source:   {}", config.cross_refs.display()));
    logger::info(&format!("Output directory:  {}", config.output_dir.display()));

    artifacts::ensure_directory_exists(&config.output_dir)?;

    logger::info("=== Load book names ===");
    let display_names = book_names::load_book_names(&config.book_names)?;

    logger::info("=== Extract verse text ===");
    let content = fs::read_to_string(&config.usfx)
        .with_context(|| format!("Failed to read USFX file: {}", config.usfx.display()))?;
    let books = usfx::parse_usfx(&content)
        .with_context(|| format!("Failed to parse USFX file: {}", config.usfx.display()))?;
    let extraction = usfx::extract_books(&books, &display_names)?;

    logger::info(&format!(
        "USFX processing complete: {} books, {} verses, {} warnings",
        extraction.stats.books_processed,
        extraction.stats.verses_extracted,
        extraction.stats.warnings
    ));

    artifacts::write_book_meta(&config.meta_output(), &extraction.meta)?;
    artifacts::write_verse_text(&config.text_output(), &extraction.verse_text)?;

    logger::info("=== Link cross-references ===");
    let mut diagnostics = RefDiagnostics::new();
    let (graph, link_stats) =
        crossref::build_cross_refs(&config.cross_refs, &extraction.verse_text, &mut diagnostics)?;
    if diagnostics.failures() > 0 {
        logger::info(&format!(
            "{} citations could not be standardized",
            diagnostics.failures()
        ));
    }

    artifacts::write_cross_refs(&config.refs_output(), &graph)?;

    let end_time = Local::now();
    let duration = (end_time - start_time).to_std().unwrap_or_default();

    let msg = format!(
        r#"
======
Preparation started: {}
Preparation ended:   {}
Duration:            {}
"#,
        start_time.format("%Y-%m-%d %H:%M:%S"),
        end_time.format("%Y-%m-%d %H:%M:%S"),
        logger::format_duration(duration)
    );
    logger::info(&msg);

    Ok(PrepSummary {
        extract_stats: extraction.stats,
        link_stats,
    })
}
