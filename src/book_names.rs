//! Book display name loading
//! Reads BookNames.xml from the USFX distribution into a code -> name map

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::logger;

/// Parse BookNames.xml content into a map of book code to short display name.
///
/// Only `<book>` elements carrying both a `code` and a `short` attribute
/// contribute an entry. Elements may appear at any depth; later entries for
/// the same code win.
pub fn parse_book_names(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut names: HashMap<String, String> = HashMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let tag_name = e.name();
                let tag_str = std::str::from_utf8(tag_name.as_ref())?;

                if tag_str == "book" {
                    let code = get_attribute(e, b"code");
                    let short = get_attribute(e, b"short");
                    if let (Some(code), Some(short)) = (code, short) {
                        names.insert(code, short);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("XML parse error at position {}: {:?}", reader.buffer_position(), e)),
            _ => {}
        }

        buf.clear();
    }

    Ok(names)
}

/// Load book display names from `path`.
pub fn load_book_names(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read book names file: {}", path.display()))?;

    let names = parse_book_names(&content)
        .with_context(|| format!("Failed to parse book names file: {}", path.display()))?;

    if names.is_empty() {
        bail!("No book name entries found in {}", path.display());
    }

    logger::info(&format!("Read {} book name entries from {}", names.len(), path.display()));
    Ok(names)
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
