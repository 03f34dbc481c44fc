// SPDX-License-Identifier: MPL-2.0
//! Page scaffold parsing.
//!
//! Scaffolds are well-formed markup with HTML conveniences: void elements
//! may be self-closed (`<meta ... />`) or bare start tags, attributes may be
//! bare (`defer`) or unquoted, and HTML5 named entities (`&nbsp;`) resolve.
//! Whitespace-only text between tags is dropped; other text is kept as is.

use super::{Document, NodeId};
use crate::error::{Error, Result};
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parses scaffold markup into a [`Document`].
///
/// A top-level `<html>` element becomes the document root; any other
/// top-level elements are appended beneath the root.
pub fn parse(markup: &str) -> Result<Document> {
    let mut doc = Document::new();
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<(String, NodeId)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let (tag, id) = open_element(&mut doc, &stack, e)?;
                if !VOID_TAGS.contains(&tag.as_str()) {
                    stack.push((tag, id));
                }
            }
            Ok(Event::Empty(ref e)) => {
                open_element(&mut doc, &stack, e)?;
            }
            Ok(Event::End(ref e)) => {
                let tag = decode_name(e.name().as_ref())?.to_ascii_lowercase();
                if VOID_TAGS.contains(&tag.as_str()) {
                    continue;
                }
                match stack.iter().rposition(|(open, _)| *open == tag) {
                    Some(pos) => stack.truncate(pos),
                    None => {
                        return Err(Error::Page(format!(
                            "unexpected closing tag </{}> at byte {}",
                            tag,
                            reader.buffer_position()
                        )))
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape_with(resolve_html5_entity)
                    .map_err(|err| Error::Page(format!("invalid text: {err}")))?;
                if !text.trim().is_empty() {
                    append_text(&mut doc, &stack, &text);
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                append_text(&mut doc, &stack, &text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(Error::Page(format!(
                    "malformed markup at byte {}: {}",
                    reader.buffer_position(),
                    err
                )))
            }
        }
    }

    if let Some((tag, _)) = stack.last() {
        if tag != "html" {
            return Err(Error::Page(format!("unclosed element <{}>", tag)));
        }
    }

    Ok(doc)
}

fn decode_name(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw).map_err(|err| Error::Page(format!("invalid tag name: {err}")))
}

fn current_parent(doc: &Document, stack: &[(String, NodeId)]) -> NodeId {
    stack.last().map_or(doc.root(), |(_, id)| *id)
}

fn open_element(
    doc: &mut Document,
    stack: &[(String, NodeId)],
    start: &BytesStart<'_>,
) -> Result<(String, NodeId)> {
    let tag = decode_name(start.name().as_ref())?.to_ascii_lowercase();

    // The outermost <html> merges into the existing root.
    let id = if tag == "html" && stack.is_empty() {
        doc.root()
    } else {
        let id = doc.create_element(&tag);
        let parent = current_parent(doc, stack);
        doc.append_child(parent, id);
        id
    };

    for attr in start.html_attributes() {
        let attr = attr.map_err(|err| Error::Page(format!("invalid attribute: {err}")))?;
        let key = decode_name(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value_with(resolve_html5_entity)
            .map_err(|err| Error::Page(format!("invalid attribute value: {err}")))?;
        doc.set_attribute(id, &key, &value);
    }

    Ok((tag, id))
}

fn append_text(doc: &mut Document, stack: &[(String, NodeId)], text: &str) {
    let parent = current_parent(doc, stack);
    let node = doc.create_text(text);
    doc.append_child(parent, node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_markup_with_root_attributes() {
        let doc = parse(
            r#"<!DOCTYPE html>
<html lang="tr">
  <head><title>Old</title><meta name="description" content="x" /></head>
  <body>
    <p id="intro" data-i18n="hero.title">Merhaba &amp; hoş geldiniz</p>
  </body>
</html>"#,
        )
        .expect("scaffold should parse");

        assert_eq!(doc.attribute(doc.root(), "lang"), Some("tr"));
        assert_eq!(doc.title(), "Old");
        let intro = doc.element_by_id("intro").expect("intro present");
        assert_eq!(doc.attribute(intro, "data-i18n"), Some("hero.title"));
        assert_eq!(doc.text_content(intro), "Merhaba & hoş geldiniz");
    }

    #[test]
    fn bare_void_start_tags_do_not_swallow_siblings() {
        let doc = parse(r#"<html><head><meta charset="utf-8"><title>T</title></head></html>"#)
            .expect("scaffold should parse");
        let meta = doc.first_by_tag("meta").expect("meta present");
        assert!(doc.children(meta).is_empty());
        let title = doc.first_by_tag("title").expect("title present");
        assert_eq!(doc.tag(doc.parent(title).expect("has parent")), Some("head"));
    }

    #[test]
    fn stray_closing_tag_is_an_error() {
        let err = parse("<html><body></div></body></html>").unwrap_err();
        assert!(matches!(err, Error::Page(_)));
    }

    #[test]
    fn html5_named_entities_resolve() {
        let doc = parse(
            r#"<html><body><p id="a">a&nbsp;b</p><p id="c" title="&copy; 2024">&copy; &#169;</p></body></html>"#,
        )
        .expect("scaffold should parse");
        let a = doc.element_by_id("a").expect("a");
        assert_eq!(doc.text_content(a), "a\u{a0}b");
        let c = doc.element_by_id("c").expect("c");
        assert_eq!(doc.text_content(c), "© ©");
        assert_eq!(doc.attribute(c, "title"), Some("© 2024"));
    }

    #[test]
    fn bare_and_unquoted_attributes_are_accepted() {
        let doc = parse(
            r#"<html><body><button disabled class=toggle-btn>x</button><script src="js/main.js" defer></script></body></html>"#,
        )
        .expect("scaffold should parse");
        let script = doc.first_by_tag("script").expect("script");
        assert_eq!(doc.attribute(script, "defer"), Some(""));
        assert_eq!(doc.attribute(script, "src"), Some("js/main.js"));
        let button = doc.first_by_tag("button").expect("button");
        assert_eq!(doc.attribute(button, "disabled"), Some(""));
        assert!(doc.has_class(button, "toggle-btn"));
    }

    #[test]
    fn whitespace_only_text_is_dropped() {
        let doc = parse("<html>\n  <body>\n  </body>\n</html>").expect("parse");
        let body = doc.body().expect("body");
        assert!(doc.children(body).is_empty());
        assert_eq!(doc.children(doc.root()).len(), 1);
    }
}
