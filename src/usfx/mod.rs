// Module exports for the USFX scripture pipeline

pub mod extract;
pub mod parser;
pub mod types;

// Re-export the main extraction API
pub use extract::{clean_verse_text, extract_books, ExtractStats, Extraction, VerseText};
pub use parser::parse_usfx;
pub use types::{BookChild, BookElement, BookMeta, InlineKind, InlineNode};
