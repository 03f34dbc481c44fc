// SPDX-License-Identifier: MPL-2.0
//! HTML5 serialization of a [`Document`].
//!
//! All text and attribute values are escaped on the way out, so content
//! strings can never inject markup.

use super::{Document, NodeId, NodeKind};
use quick_xml::escape::escape;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serializes the whole document, doctype included.
#[must_use]
pub fn to_html(doc: &Document) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    write_node(doc, doc.root(), &mut out);
    out.push('\n');
    out
}

/// Serializes the children of `id` (the equivalent of `innerHTML`).
#[must_use]
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for child in doc.children(id) {
        write_node(doc, *child, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        None => {}
        Some(NodeKind::Text(text)) => out.push_str(&escape(text.as_str())),
        Some(NodeKind::Element(element)) => {
            out.push('<');
            out.push_str(element.tag());
            for (name, value) in element.attributes() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&element.tag()) {
                return;
            }

            for child in doc.children(id) {
                write_node(doc, *child, out);
            }
            out.push_str("</");
            out.push_str(element.tag());
            out.push('>');
        }
    }
}
