// SPDX-License-Identifier: MPL-2.0
//! Localized page content.
//!
//! The content document maps a language code to a content tree. Free text is
//! looked up by dotted path ([`lookup`]); structured sections are decoded
//! into the typed records of [`schema`] when they are rendered.

pub mod schema;
pub mod store;

pub use store::{ContentSource, ContentStore};

use crate::error::ContentError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Language used when the requested one has no content tree.
pub const FALLBACK_LANGUAGE: &str = "tr";

/// A whole localized content document, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentDocument {
    languages: BTreeMap<String, Value>,
}

impl ContentDocument {
    /// Decodes a document from JSON bytes.
    ///
    /// The top level must be an object keyed by language code.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContentError> {
        let languages: BTreeMap<String, Value> =
            serde_json::from_slice(bytes).map_err(|err| ContentError::Parse(err.to_string()))?;
        Ok(Self { languages })
    }

    /// Language codes present in the document, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Content tree for `code` exactly, without fallback.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Value> {
        self.languages.get(code)
    }

    /// Content tree for `code`, or the `fallback` language's tree when
    /// `code` is not configured.
    #[must_use]
    pub fn language_or<'a>(&'a self, code: &str, fallback: &str) -> Option<&'a Value> {
        self.get(code).or_else(|| self.get(fallback))
    }

    /// Content tree for `code`, falling back to [`FALLBACK_LANGUAGE`].
    #[must_use]
    pub fn language(&self, code: &str) -> Option<&Value> {
        self.language_or(code, FALLBACK_LANGUAGE)
    }
}

/// Resolves a dotted path (`"hero.title"`) inside a content tree.
///
/// Each segment indexes an object key; a purely numeric segment also indexes
/// arrays. Any missing step yields `None`.
#[must_use]
pub fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(tree, |node, key| match node {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Like [`lookup`], but only yields string values.
#[must_use]
pub fn lookup_str<'a>(tree: &'a Value, path: &str) -> Option<&'a str> {
    lookup(tree, path).and_then(Value::as_str)
}
