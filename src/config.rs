//! Pipeline configuration
//! Resolves input file and output directory paths

use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_DIR: &str = "source_data";
pub const DEFAULT_OUTPUT_DIR: &str = "data";

// Layout of the unzipped USFX package under the source directory.
const USFX_PACKAGE_DIR: &str = "engwebu_usfx";
const BOOK_NAMES_FILE: &str = "BookNames.xml";
const USFX_FILE: &str = "engwebu_usfx.xml";
const CROSS_REFS_FILE: &str = "cross_references.txt";

const META_OUTPUT: &str = "bibleMeta.json";
const TEXT_OUTPUT: &str = "webBibleText.json";
const REFS_OUTPUT: &str = "crossRefs.json";

/// Resolved input and output paths for one pipeline run.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub book_names: PathBuf,
    pub usfx: PathBuf,
    pub cross_refs: PathBuf,
    pub output_dir: PathBuf,
}

impl PrepConfig {
    /// Resolve paths from a source directory and optional per-file
    /// overrides. An explicit file path wins over the package layout.
    pub fn resolve(
        source_dir: &Path,
        book_names: Option<PathBuf>,
        usfx: Option<PathBuf>,
        cross_refs: Option<PathBuf>,
        output_dir: PathBuf,
    ) -> Self {
        let package_dir = source_dir.join(USFX_PACKAGE_DIR);

        PrepConfig {
            book_names: book_names.unwrap_or_else(|| package_dir.join(BOOK_NAMES_FILE)),
            usfx: usfx.unwrap_or_else(|| package_dir.join(USFX_FILE)),
            cross_refs: cross_refs.unwrap_or_else(|| source_dir.join(CROSS_REFS_FILE)),
            output_dir,
        }
    }

    pub fn meta_output(&self) -> PathBuf {
        self.output_dir.join(META_OUTPUT)
    }

    pub fn text_output(&self) -> PathBuf {
        self.output_dir.join(TEXT_OUTPUT)
    }

    pub fn refs_output(&self) -> PathBuf {
        self.output_dir.join(REFS_OUTPUT)
    }
}
