//! JSON artifact output
//!
//! The three data files the pipeline produces: bibleMeta.json (pretty,
//! read by humans as often as by code), webBibleText.json and
//! crossRefs.json (compact, served as-is).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::crossref::CrossRefGraph;
use crate::logger;
use crate::usfx::{BookMeta, VerseText};

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create output directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write bibleMeta.json, a pretty-printed array in canonical book order.
pub fn write_book_meta(path: &Path, meta: &[BookMeta]) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)
        .context("Failed to serialize book metadata")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    logger::info(&format!("Saved {} ({} books)", path.display(), meta.len()));
    Ok(())
}

/// Write webBibleText.json, a compact verse ID to text map.
pub fn write_verse_text(path: &Path, verse_text: &VerseText) -> Result<()> {
    let json = serde_json::to_string(verse_text)
        .context("Failed to serialize verse text")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    logger::info(&format!("Saved {} ({} verses)", path.display(), verse_text.len()));
    Ok(())
}

/// Write crossRefs.json, a compact verse ID to neighbor list map.
pub fn write_cross_refs(path: &Path, graph: &CrossRefGraph) -> Result<()> {
    let json = serde_json::to_string(graph)
        .context("Failed to serialize cross-references")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    logger::info(&format!("Saved {} ({} verses with references)", path.display(), graph.len()));
    Ok(())
}
