//! Data structures for the USFX scripture document
//! Books hold a flat child sequence of chapter markers and text blocks

use serde::Serialize;

use crate::canon::BookCode;

/// Inline element kinds the verse extractor distinguishes inside a block.
///
/// Anything else (footnotes, cross-reference notes, formatting wrappers)
/// is `Other`: it contributes no text of its own and its tail is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    /// `<v id="N"/>` verse start marker
    VerseStart,
    /// `<ve/>` verse end marker
    VerseEnd,
    /// `<w>` word-level markup, text and tail both count
    Word,
    /// `<char>` character styling, text and tail both count
    Char,
    /// `<ref>` reference link, only the tail counts
    Ref,
    /// `<bk>` book title mention, only the tail counts
    BookName,
    Other,
}

impl InlineKind {
    pub fn from_tag(tag: &str) -> InlineKind {
        match tag {
            "v" => InlineKind::VerseStart,
            "ve" => InlineKind::VerseEnd,
            "w" => InlineKind::Word,
            "char" => InlineKind::Char,
            "ref" => InlineKind::Ref,
            "bk" => InlineKind::BookName,
            _ => InlineKind::Other,
        }
    }
}

/// One element inside a block container, flattened in document order.
///
/// `text` is the character data directly inside the element, `tail` the
/// character data between its closing tag and the next sibling. Splitting
/// the two keeps verse attribution exact: a verse marker's tail belongs to
/// the verse it opens, while text inside an ignored element does not.
#[derive(Debug, Clone)]
pub struct InlineNode {
    pub kind: InlineKind,
    /// The `id` attribute, present on verse and chapter style markers.
    pub id: Option<String>,
    pub text: String,
    pub tail: String,
}

impl InlineNode {
    pub fn new(kind: InlineKind, id: Option<String>) -> Self {
        InlineNode {
            kind,
            id,
            text: String::new(),
            tail: String::new(),
        }
    }
}

/// A direct child of a `<book>` element.
#[derive(Debug, Clone)]
pub enum BookChild {
    /// `<c id="N"/>` chapter milestone. The id stays unparsed here so the
    /// extractor can report invalid numbers itself.
    Chapter { id: Option<String> },
    /// Any other child element (`<p>`, `<q>`, `<d>`, ...) with its inline
    /// descendants flattened in document order.
    Block { nodes: Vec<InlineNode> },
}

/// A `<book>` element with its `id` attribute and child sequence.
#[derive(Debug, Clone)]
pub struct BookElement {
    pub code: String,
    pub children: Vec<BookChild>,
}

/// Per-book metadata emitted to bibleMeta.json.
///
/// `chapters[i]` is the highest verse number seen in chapter `i + 1`.
#[derive(Debug, Clone, Serialize)]
pub struct BookMeta {
    pub book_name: String,
    pub book_abbr: BookCode,
    pub chapters: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_kind_from_tag() {
        assert_eq!(InlineKind::from_tag("v"), InlineKind::VerseStart);
        assert_eq!(InlineKind::from_tag("ve"), InlineKind::VerseEnd);
        assert_eq!(InlineKind::from_tag("w"), InlineKind::Word);
        assert_eq!(InlineKind::from_tag("char"), InlineKind::Char);
        assert_eq!(InlineKind::from_tag("ref"), InlineKind::Ref);
        assert_eq!(InlineKind::from_tag("bk"), InlineKind::BookName);
        assert_eq!(InlineKind::from_tag("f"), InlineKind::Other);
        assert_eq!(InlineKind::from_tag("x"), InlineKind::Other);
    }

    #[test]
    fn test_book_meta_serializes_with_plain_code() {
        let meta = BookMeta {
            book_name: "Genesis".to_string(),
            book_abbr: "GEN".parse().unwrap(),
            chapters: vec![31, 25],
        };

        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(
            json,
            r#"{"book_name":"Genesis","book_abbr":"GEN","chapters":[31,25]}"#
        );
    }
}
