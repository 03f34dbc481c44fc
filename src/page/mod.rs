// SPDX-License-Identifier: MPL-2.0
//! The hosting page: a document plus its resolved view bindings.

pub mod view;

pub use view::ViewBindings;

use crate::assets;
use crate::dom::{self, Document};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Page {
    pub document: Document,
    pub view: ViewBindings,
}

impl Page {
    /// Wraps a document, resolving its bindings once.
    #[must_use]
    pub fn new(document: Document) -> Self {
        let view = ViewBindings::resolve(&document);
        Self { document, view }
    }

    /// Parses scaffold markup into a page.
    pub fn from_markup(markup: &str) -> Result<Self> {
        Ok(Self::new(dom::parse(markup)?))
    }

    /// Reads and parses a scaffold file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let markup = fs::read_to_string(path)?;
        Self::from_markup(&markup)
    }

    /// The scaffold bundled with the binary.
    pub fn bundled() -> Result<Self> {
        let markup = assets::get_str(assets::PAGE_SCAFFOLD)
            .ok_or_else(|| Error::Page(format!("bundled page missing: {}", assets::PAGE_SCAFFOLD)))?;
        Self::from_markup(&markup)
    }

    /// Serializes the current state of the page.
    #[must_use]
    pub fn to_html(&self) -> String {
        dom::html::to_html(&self.document)
    }
}
