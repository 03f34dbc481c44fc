// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the page, the content
//! store and the user's preferences.
//!
//! The `App` struct owns everything a page session needs and translates
//! messages into page mutations and preference writes. Content loading is the
//! only asynchronous step; every message is handled synchronously.

pub mod binder;
pub mod config;
pub mod environment;
mod message;
pub mod navigation;
pub mod paths;
pub mod preferences;
pub mod storage;
mod update;

pub use binder::{DomEvent, EventBinder};
pub use message::{Flags, Message};

use crate::content::{ContentDocument, ContentStore};
use crate::error::{RenderError, Result};
use crate::page::Page;
use crate::render;
use chrono::Datelike;
use config::Config;
use environment::Environment;
use navigation::NavState;
use preferences::{PreferenceState, Theme};
use std::fmt;
use std::sync::Arc;

/// Attribute on `<body>` reporting the reduced-motion preference.
pub const REDUCED_MOTION_ATTRIBUTE: &str = "data-reduced-motion";

/// Root state of a page session.
pub struct App {
    page: Page,
    preferences: PreferenceState,
    content: ContentStore,
    binder: EventBinder,
    nav: NavState,
    config: Config,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("preferences", &self.preferences)
            .field("content_source", self.content.source())
            .field("nav", &self.nav)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Applies the startup preferences to `page` and binds its controls.
    ///
    /// Nothing is rendered yet; call [`App::start`] to load content.
    pub fn new(
        mut page: Page,
        mut preferences: PreferenceState,
        content: ContentStore,
        config: Config,
        env: &Environment,
    ) -> Self {
        let theme = preferences.theme();
        preferences.set_theme(theme, &mut page);
        if let Some(body) = page.document.body() {
            let reduced = if env.prefers_reduced_motion { "true" } else { "false" };
            page.document.set_attribute(body, REDUCED_MOTION_ATTRIBUTE, reduced);
        }
        preferences::apply_theme_icon(&mut page, theme);
        if let Some(year) = page.view.year {
            let current = chrono::Local::now().year().to_string();
            page.document.set_text_content(year, &current);
        }

        let binder = EventBinder::bind(&page);
        Self {
            page,
            preferences,
            content,
            binder,
            nav: NavState::default(),
            config,
        }
    }

    /// Loads the content document and renders the stored language.
    pub async fn start(&mut self) -> Result<()> {
        let document = self.content.load().await?;
        let lang = self.preferences.language().to_string();
        self.render_language(&document, &lang)
    }

    /// Switches to `lang` and repaints the whole page from `document`.
    ///
    /// Falls back to the configured fallback language when `lang` has no
    /// content tree. The language itself is recorded before the lookup.
    fn render_language(&mut self, document: &ContentDocument, lang: &str) -> Result<()> {
        self.preferences.set_language(lang, &mut self.page);
        let tree = document
            .language_or(lang, self.config.fallback_language())
            .ok_or_else(|| RenderError::MissingLanguage(lang.to_string()))?;
        render::render(&mut self.page, tree)?;
        tracing::debug!(lang, "rendered page");
        Ok(())
    }

    /// Routes a host event through the binder and handles every resulting
    /// message in order.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<()> {
        for message in self.binder.route(&self.page.document, event) {
            self.update(message)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable page access, for hosts that report layout.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    #[must_use]
    pub fn language(&self) -> &str {
        self.preferences.language()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    #[must_use]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[must_use]
    pub fn content(&self) -> Option<Arc<ContentDocument>> {
        self.content.cached()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        self.page.to_html()
    }
}
