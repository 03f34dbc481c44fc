// SPDX-License-Identifier: MPL-2.0
//! `vitrine` renders a bilingual personal portfolio page from a localized
//! content document.
//!
//! It loads the content once, paints the active language into a page
//! scaffold, remembers the visitor's language and theme between sessions,
//! and reacts to the page's controls (language and theme toggles, the mobile
//! menu, scroll-spy navigation).

#![doc(html_root_url = "https://docs.rs/vitrine/0.3.0")]

pub mod app;
pub mod assets;
pub mod content;
pub mod dom;
pub mod error;
pub mod page;
pub mod render;
