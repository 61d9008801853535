//! Cross-reference graph construction
//!
//! Reads a tab-separated citation pair file, standardizes both sides, and
//! builds a symmetric adjacency map over verses that exist in the
//! extracted text. The file format is two citation columns per line, with
//! `#` comment lines and blank lines throughout.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use anyhow::{Context, Result};

use crate::crossref::normalize::{standardize_citation, RefDiagnostics};
use crate::logger;
use crate::usfx::VerseText;

/// Verse ID to its sorted list of cross-referenced verse IDs.
pub type CrossRefGraph = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default)]
pub struct LinkStats {
    pub lines_processed: usize,
    /// Unique undirected pairs added to the graph.
    pub pairs_added: usize,
    /// Comments, blanks, short lines, standardization failures and
    /// self-references.
    pub skipped_lines: usize,
    /// Lines whose citations standardized but name a verse the extracted
    /// text does not contain.
    pub unmatched_refs: usize,
}

/// Build the cross-reference graph from `path`, keeping only pairs where
/// both verses exist in `verse_text`.
///
/// Every accepted pair is inserted in both directions, so the graph is
/// symmetric by construction. A missing file is not an error: the tool
/// still produces its text artifacts, with an empty graph and a warning.
pub fn build_cross_refs(
    path: &Path,
    verse_text: &VerseText,
    diagnostics: &mut RefDiagnostics,
) -> Result<(CrossRefGraph, LinkStats)> {
    let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut stats = LinkStats::default();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            logger::warn(&format!(
                "Cross-reference file not found at {}, skipping",
                path.display()
            ));
            return Ok((CrossRefGraph::new(), stats));
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open cross-reference file: {}", path.display()));
        }
    };

    let reader = BufReader::new(file);

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result
            .with_context(|| format!("Failed to read line {} of {}", line_num + 1, path.display()))?;
        stats.lines_processed += 1;

        if line.starts_with('#') || line.trim().is_empty() {
            stats.skipped_lines += 1;
            continue;
        }

        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < 2 {
            stats.skipped_lines += 1;
            continue;
        }

        let std_a = standardize_citation(fields[0], diagnostics);
        let std_b = standardize_citation(fields[1], diagnostics);

        let (verse_a, verse_b) = match (std_a, std_b) {
            (Some(a), Some(b)) if a != b => (a, b),
            _ => {
                stats.skipped_lines += 1;
                continue;
            }
        };

        if !verse_text.contains_key(&verse_a) || !verse_text.contains_key(&verse_b) {
            stats.unmatched_refs += 1;
            continue;
        }

        if adjacency.entry(verse_a.clone()).or_default().insert(verse_b.clone()) {
            stats.pairs_added += 1;
        }
        adjacency.entry(verse_b).or_default().insert(verse_a);
    }

    logger::info(&format!(
        "Cross-reference processing: {} lines, {} unique pairs over {} verses",
        stats.lines_processed,
        stats.pairs_added,
        adjacency.len()
    ));
    if stats.skipped_lines > 0 {
        logger::info(&format!(
            "Skipped {} lines (comments, blanks, unparsable citations)",
            stats.skipped_lines
        ));
    }
    if stats.unmatched_refs > 0 {
        logger::warn(&format!(
            "{} reference pairs named verses missing from the extracted text",
            stats.unmatched_refs
        ));
    }

    let graph = adjacency
        .into_iter()
        .map(|(verse, refs)| (verse, refs.into_iter().collect()))
        .collect();

    Ok((graph, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn verse_text_with(ids: &[&str]) -> VerseText {
        ids.iter()
            .map(|id| (id.to_string(), "text".to_string()))
            .collect()
    }

    fn write_refs_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn build(
        content: &str,
        verse_ids: &[&str],
    ) -> (CrossRefGraph, LinkStats) {
        let file = write_refs_file(content);
        let verse_text = verse_text_with(verse_ids);
        build_cross_refs(file.path(), &verse_text, &mut RefDiagnostics::disabled()).unwrap()
    }

    #[test]
    fn test_symmetric_pair() {
        let (graph, stats) = build(
            "Gen.1.1\tJohn.1.1\n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.get("GEN 1:1"), Some(&vec!["JHN 1:1".to_string()]));
        assert_eq!(graph.get("JHN 1:1"), Some(&vec!["GEN 1:1".to_string()]));
        assert_eq!(stats.pairs_added, 1);
        assert_eq!(stats.lines_processed, 1);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let (graph, stats) = build(
            "# cross references v1\n\nGen.1.1\tJohn.1.1\n   \n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(stats.lines_processed, 4);
        assert_eq!(stats.skipped_lines, 3);
    }

    #[test]
    fn test_single_column_line_skipped() {
        let (graph, stats) = build(
            "Gen.1.1\nGen.1.1\tJohn.1.1\n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(stats.skipped_lines, 1);
        assert_eq!(stats.pairs_added, 1);
    }

    #[test]
    fn test_duplicate_pairs_counted_once() {
        let (graph, stats) = build(
            "Gen.1.1\tJohn.1.1\nGen.1.1\tJohn.1.1\nJohn.1.1\tGen.1.1\n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.get("GEN 1:1"), Some(&vec!["JHN 1:1".to_string()]));
        // Both orientations describe the same undirected pair.
        assert_eq!(stats.pairs_added, 1);
    }

    #[test]
    fn test_self_reference_skipped() {
        let (graph, stats) = build("Gen.1.1\tGen.1.1\n", &["GEN 1:1"]);

        assert!(graph.is_empty());
        assert_eq!(stats.skipped_lines, 1);
    }

    #[test]
    fn test_unknown_verse_counts_as_unmatched() {
        let (graph, stats) = build(
            "Gen.1.1\tJohn.1.1\nGen.1.1\tRev.22.21\n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(stats.unmatched_refs, 1);
    }

    #[test]
    fn test_unparsable_citation_skips_line() {
        let (graph, stats) = build(
            "Gen.1.1\tnot a citation\nGen.1.1\tJohn.1.1\n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(stats.skipped_lines, 1);
        assert_eq!(stats.pairs_added, 1);
    }

    #[test]
    fn test_neighbor_lists_are_sorted() {
        let (graph, _) = build(
            "Gen.1.1\tJohn.1.1\nGen.1.1\tExod.3.14\nGen.1.1\tRev.22.21\n",
            &["GEN 1:1", "JHN 1:1", "EXO 3:14", "REV 22:21"],
        );

        assert_eq!(
            graph.get("GEN 1:1"),
            Some(&vec![
                "EXO 3:14".to_string(),
                "JHN 1:1".to_string(),
                "REV 22:21".to_string(),
            ])
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let (graph, _) = build(
            "Gen.1.1\tJohn.1.1\t12\n",
            &["GEN 1:1", "JHN 1:1"],
        );

        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_missing_file_yields_empty_graph() {
        let verse_text = verse_text_with(&["GEN 1:1"]);
        let (graph, stats) = build_cross_refs(
            Path::new("/nonexistent/cross_references.txt"),
            &verse_text,
            &mut RefDiagnostics::disabled(),
        )
        .unwrap();

        assert!(graph.is_empty());
        assert_eq!(stats.lines_processed, 0);
    }

    #[test]
    fn test_graph_is_symmetric() {
        let (graph, _) = build(
            "Gen.1.1\tJohn.1.1\nJohn.1.1\tRev.22.21\nGen.1.1\tRev.22.21\n",
            &["GEN 1:1", "JHN 1:1", "REV 22:21"],
        );

        for (verse, refs) in &graph {
            for other in refs {
                let back = graph.get(other).map(|r| r.contains(verse)).unwrap_or(false);
                assert!(back, "{} -> {} has no reverse edge", verse, other);
            }
        }
    }
}
