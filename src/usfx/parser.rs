//! Streaming parser for USFX scripture documents
//!
//! Reads the document into per-book child sequences: `<c>` chapter
//! milestones stay separate while every other child element becomes a block
//! whose descendants are flattened in document order. Character data is
//! attributed the way a DOM would see it, as element text (directly inside)
//! or tail (between the closing tag and the next sibling), because verse
//! boundaries in USFX are milestones and most verse text lives in tails.

use anyhow::{bail, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::usfx::types::{BookChild, BookElement, InlineKind, InlineNode};

/// Parse USFX content into book elements, in document order.
///
/// Book elements are recognized at any depth. Fails on structurally
/// malformed XML (mismatched or unclosed tags, truncated input) and when
/// the document contains no `<book>` element at all. An unclosed element
/// must not parse: the open block would otherwise absorb the remaining
/// books of the document.
pub fn parse_usfx(content: &str) -> Result<Vec<BookElement>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut books: Vec<BookElement> = Vec::new();
    let mut current_book: Option<BookElement> = None;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag_name = e.name();
                let tag_str = std::str::from_utf8(tag_name.as_ref())?;

                if current_book.is_none() {
                    if tag_str == "book" {
                        let code = get_attribute(e, b"id").unwrap_or_default();
                        current_book = Some(BookElement {
                            code,
                            children: Vec::new(),
                        });
                    }
                } else if tag_str == "c" {
                    let id = get_attribute(e, b"id");
                    if let Some(ref mut book) = current_book {
                        book.children.push(BookChild::Chapter { id });
                    }
                } else {
                    let kind = InlineKind::from_tag(tag_str);
                    let id = get_attribute(e, b"id");
                    let nodes = parse_block(&mut reader, kind, id)?;
                    if let Some(ref mut book) = current_book {
                        book.children.push(BookChild::Block { nodes });
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let tag_name = e.name();
                let tag_str = std::str::from_utf8(tag_name.as_ref())?;

                if let Some(ref mut book) = current_book {
                    if tag_str == "c" {
                        let id = get_attribute(e, b"id");
                        book.children.push(BookChild::Chapter { id });
                    } else {
                        // A milestone directly under <book>, e.g. a page or
                        // line break. Kept as a single-node block.
                        let node = InlineNode::new(InlineKind::from_tag(tag_str), get_attribute(e, b"id"));
                        book.children.push(BookChild::Block { nodes: vec![node] });
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let tag_name = e.name();
                let tag_str = std::str::from_utf8(tag_name.as_ref())?;

                if tag_str == "book" {
                    if let Some(book) = current_book.take() {
                        books.push(book);
                    }
                }
            }
            Ok(Event::Eof) => {
                if current_book.is_some() {
                    bail!("USFX document ended inside an unclosed <book> element");
                }
                break;
            }
            Err(e) => return Err(anyhow::anyhow!("XML parse error at position {}: {:?}", reader.buffer_position(), e)),
            _ => {}
        }

        buf.clear();
    }

    if books.is_empty() {
        bail!("No <book> elements found in USFX document");
    }

    Ok(books)
}

/// Flatten a block container and its descendants into preorder nodes.
///
/// The container itself is node 0; for ordinary containers (`<p>`, `<q>`,
/// `<d>`) its kind is `Other`, so leading character data recorded as its
/// text never reaches a verse. A stack of open nodes receives element text,
/// and the most recently closed node receives tail text, which reproduces
/// DOM text/tail attribution over the event stream.
fn parse_block(
    reader: &mut Reader<&[u8]>,
    container_kind: InlineKind,
    container_id: Option<String>,
) -> Result<Vec<InlineNode>> {
    let mut nodes = vec![InlineNode::new(container_kind, container_id)];
    let mut open: Vec<usize> = vec![0];
    let mut last_closed: Option<usize> = None;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let tag_name = e.name();
                let tag_str = std::str::from_utf8(tag_name.as_ref())?;
                let idx = nodes.len();
                nodes.push(InlineNode::new(InlineKind::from_tag(tag_str), get_attribute(e, b"id")));
                open.push(idx);
                last_closed = None;
            }
            Ok(Event::Empty(ref e)) => {
                let tag_name = e.name();
                let tag_str = std::str::from_utf8(tag_name.as_ref())?;
                let idx = nodes.len();
                nodes.push(InlineNode::new(InlineKind::from_tag(tag_str), get_attribute(e, b"id")));
                last_closed = Some(idx);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape()?;
                match last_closed {
                    Some(idx) => nodes[idx].tail.push_str(&text),
                    None => {
                        if let Some(&idx) = open.last() {
                            nodes[idx].text.push_str(&text);
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                if let Some(idx) = open.pop() {
                    last_closed = Some(idx);
                }
                if open.is_empty() {
                    break;
                }
            }
            Ok(Event::Eof) => bail!("USFX document ended inside an unclosed block element"),
            Err(e) => return Err(anyhow::anyhow!("XML parse error at position {}: {:?}", reader.buffer_position(), e)),
            _ => {}
        }

        buf.clear();
    }

    Ok(nodes)
}

/// Get an attribute value from a BytesStart element
fn get_attribute(element: &quick_xml::events::BytesStart, attr_name: &[u8]) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == attr_name)
        .map(|a| {
            String::from_utf8(a.value.to_vec()).unwrap_or_default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_with_chapters_and_blocks() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <usfx>
                <book id="GEN">
                    <c id="1"/>
                    <p><v id="1"/>In the beginning<ve/></p>
                    <c id="2"/>
                    <p><v id="1"/>And so on<ve/></p>
                </book>
            </usfx>"#;

        let books = parse_usfx(xml).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].code, "GEN");
        assert_eq!(books[0].children.len(), 4);

        match &books[0].children[0] {
            BookChild::Chapter { id } => assert_eq!(id.as_deref(), Some("1")),
            other => panic!("Expected a chapter milestone, got {:?}", other),
        }
        match &books[0].children[2] {
            BookChild::Chapter { id } => assert_eq!(id.as_deref(), Some("2")),
            other => panic!("Expected a chapter milestone, got {:?}", other),
        }
    }

    #[test]
    fn test_verse_text_lands_in_marker_tail() {
        let xml = r#"<usfx><book id="GEN">
            <c id="1"/>
            <p><v id="1"/>In the beginning God created.<ve/></p>
        </book></usfx>"#;

        let books = parse_usfx(xml).unwrap();
        let nodes = match &books[0].children[1] {
            BookChild::Block { nodes } => nodes,
            other => panic!("Expected a block, got {:?}", other),
        };

        // Container first, then the milestones in document order.
        assert_eq!(nodes[0].kind, InlineKind::Other);
        assert_eq!(nodes[1].kind, InlineKind::VerseStart);
        assert_eq!(nodes[1].id.as_deref(), Some("1"));
        assert_eq!(nodes[1].tail, "In the beginning God created.");
        assert_eq!(nodes[2].kind, InlineKind::VerseEnd);
    }

    #[test]
    fn test_leading_text_belongs_to_container() {
        let xml = r#"<usfx><book id="GEN">
            <c id="1"/>
            <p>Heading text<v id="1"/>Verse text<ve/></p>
        </book></usfx>"#;

        let books = parse_usfx(xml).unwrap();
        let nodes = match &books[0].children[1] {
            BookChild::Block { nodes } => nodes,
            other => panic!("Expected a block, got {:?}", other),
        };

        assert_eq!(nodes[0].kind, InlineKind::Other);
        assert_eq!(nodes[0].text, "Heading text");
        assert_eq!(nodes[1].tail, "Verse text");
    }

    #[test]
    fn test_nested_elements_flatten_in_preorder() {
        let xml = r#"<usfx><book id="GEN">
            <c id="1"/>
            <p><v id="1"/>He said <char style="add">to <w>them</w> all</char> and left.<ve/></p>
        </book></usfx>"#;

        let books = parse_usfx(xml).unwrap();
        let nodes = match &books[0].children[1] {
            BookChild::Block { nodes } => nodes,
            other => panic!("Expected a block, got {:?}", other),
        };

        let kinds: Vec<InlineKind> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InlineKind::Other,
                InlineKind::VerseStart,
                InlineKind::Char,
                InlineKind::Word,
                InlineKind::VerseEnd,
            ]
        );

        assert_eq!(nodes[1].tail, "He said ");
        assert_eq!(nodes[2].text, "to ");
        assert_eq!(nodes[2].tail, " and left.");
        assert_eq!(nodes[3].text, "them");
        assert_eq!(nodes[3].tail, " all");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = r#"<usfx><book id="GEN">
            <c id="1"/>
            <p><v id="1"/>light &amp; darkness<ve/></p>
        </book></usfx>"#;

        let books = parse_usfx(xml).unwrap();
        let nodes = match &books[0].children[1] {
            BookChild::Block { nodes } => nodes,
            other => panic!("Expected a block, got {:?}", other),
        };

        assert_eq!(nodes[1].tail, "light & darkness");
    }

    #[test]
    fn test_books_found_at_depth() {
        let xml = r#"<usfx>
            <languageCode>eng</languageCode>
            <shelf>
                <book id="MAT"><c id="1"/><p><v id="1"/>Text<ve/></p></book>
                <book id="MRK"><c id="1"/><p><v id="1"/>More<ve/></p></book>
            </shelf>
        </usfx>"#;

        let books = parse_usfx(xml).unwrap();
        let codes: Vec<&str> = books.iter().map(|b| b.code.as_str()).collect();
        assert_eq!(codes, vec!["MAT", "MRK"]);
    }

    #[test]
    fn test_book_without_id_gets_empty_code() {
        let xml = r#"<usfx><book><c id="1"/></book></usfx>"#;

        let books = parse_usfx(xml).unwrap();
        assert_eq!(books[0].code, "");
    }

    #[test]
    fn test_no_books_is_an_error() {
        let xml = r#"<usfx><languageCode>eng</languageCode></usfx>"#;
        assert!(parse_usfx(xml).is_err());
    }

    #[test]
    fn test_unclosed_inline_element_is_an_error() {
        // The unclosed <w> must fail the parse. Were it tolerated, its
        // block would run past </book> and the sibling books would vanish
        // from the output.
        let xml = r#"<usfx>
            <book id="GEN"><c id="1"/><p><v id="1"/>In the beginning<ve/></p></book>
            <book id="EXO"><c id="1"/><p><v id="1"/>These are the names <w>of<ve/></p></book>
            <book id="MAT"><c id="1"/><p><v id="1"/>The book of the genealogy<ve/></p></book>
        </usfx>"#;

        assert!(parse_usfx(xml).is_err());
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        let xml = r#"<usfx><book id="GEN">
            <c id="1"/>
            <p><v id="1"/>In the beginning<ve/></q>
        </book></usfx>"#;

        assert!(parse_usfx(xml).is_err());
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        // Cut off inside a block, and cut off inside a book.
        let xml = r#"<usfx><book id="GEN"><c id="1"/><p><v id="1"/>In the begi"#;
        assert!(parse_usfx(xml).is_err());

        let xml = r#"<usfx><book id="GEN"><c id="1"/>"#;
        assert!(parse_usfx(xml).is_err());
    }
}
