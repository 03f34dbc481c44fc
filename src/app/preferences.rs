// SPDX-License-Identifier: MPL-2.0
//! Language and theme preferences.
//!
//! Both are resolved once at startup (stored value first, then the system
//! default) and written back to the key-value store on every change. Every
//! setter also reflects the new value on the page.

use super::config::{
    DEFAULT_LANGUAGE, LANGUAGE_STORAGE_KEY, THEME_STORAGE_KEY, TURKISH_LOCALE_PREFIX,
};
use super::environment::Environment;
use super::storage::KeyValueStore;
use crate::page::Page;
use crate::render;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute on the root element that stylesheets key the palette on.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored theme value; anything but `light`/`dark` is rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the theme button.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    /// Accessible label of the theme button.
    ///
    /// Always Turkish, whatever the active page language.
    #[must_use]
    pub fn aria_label(self) -> &'static str {
        match self {
            Theme::Dark => "Koyu tema",
            Theme::Light => "Açık tema",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted language/theme pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub language: String,
    pub theme: Theme,
}

impl Preferences {
    /// Stored values win; otherwise the system locale and color scheme
    /// decide.
    #[must_use]
    pub fn resolve(store: &dyn KeyValueStore, env: &Environment) -> Self {
        let language = store
            .get(LANGUAGE_STORAGE_KEY)
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| default_language(env).to_string());
        let theme = store
            .get(THEME_STORAGE_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_else(|| default_theme(env));
        Self { language, theme }
    }
}

fn default_language(env: &Environment) -> &'static str {
    match env.locale.as_deref() {
        Some(locale) if locale.starts_with(TURKISH_LOCALE_PREFIX) => TURKISH_LOCALE_PREFIX,
        _ => DEFAULT_LANGUAGE,
    }
}

fn default_theme(env: &Environment) -> Theme {
    if env.prefers_light {
        Theme::Light
    } else {
        Theme::Dark
    }
}

/// Current preferences plus the store they are persisted to.
pub struct PreferenceState {
    current: Preferences,
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for PreferenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceState")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl PreferenceState {
    /// Resolves the startup preferences from `store` and `env`.
    #[must_use]
    pub fn load(store: Box<dyn KeyValueStore>, env: &Environment) -> Self {
        let current = Preferences::resolve(&*store, env);
        tracing::debug!(
            language = %current.language,
            theme = %current.theme,
            "resolved preferences"
        );
        Self { current, store }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.current.language
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    /// Hands the store back, e.g. to resolve preferences again as a reload would.
    #[must_use]
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            tracing::warn!(key, %err, "failed to persist preference");
        }
    }

    /// Switches language: persists it, sets the root `lang` attribute and
    /// updates every language toggle.
    pub fn set_language(&mut self, lang: &str, page: &mut Page) {
        self.current.language = lang.to_string();
        self.persist(LANGUAGE_STORAGE_KEY, lang);
        let root = page.document.root();
        page.document.set_attribute(root, "lang", lang);
        render::apply_language_toggles(page, lang);
    }

    /// Switches theme: persists it and sets the root `data-theme` attribute.
    pub fn set_theme(&mut self, theme: Theme, page: &mut Page) {
        self.current.theme = theme;
        self.persist(THEME_STORAGE_KEY, theme.as_str());
        let root = page.document.root();
        page.document.set_attribute(root, THEME_ATTRIBUTE, theme.as_str());
    }

    /// Flips the theme and updates the theme button's glyph and label.
    pub fn toggle_theme(&mut self, page: &mut Page) -> Theme {
        let next = self.current.theme.toggled();
        self.set_theme(next, page);
        if let Some(button) = page.view.theme_button {
            page.document.set_text_content(button, next.icon());
            page.document.set_attribute(button, "aria-label", next.aria_label());
        }
        next
    }
}

/// Shows the glyph for `theme` on the theme button, leaving its label alone.
pub fn apply_theme_icon(page: &mut Page, theme: Theme) {
    if let Some(button) = page.view.theme_button {
        page.document.set_text_content(button, theme.icon());
    }
}
