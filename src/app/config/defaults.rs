// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration and page constants.

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Content tree used when the active language has none of its own.
pub const DEFAULT_FALLBACK_LANGUAGE: &str = crate::content::FALLBACK_LANGUAGE;

/// Language picked when the system locale does not start with `tr`.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Locale prefix that selects Turkish on first visit.
pub const TURKISH_LOCALE_PREFIX: &str = "tr";

// ==========================================================================
// Navigation Defaults
// ==========================================================================

/// Distance below the scroll position used to decide the active nav link.
pub const DEFAULT_NAV_ANCHOR_OFFSET: f32 = 120.0;

/// Smallest accepted anchor offset.
pub const MIN_NAV_ANCHOR_OFFSET: f32 = 0.0;

/// Largest accepted anchor offset.
pub const MAX_NAV_ANCHOR_OFFSET: f32 = 2000.0;

// ==========================================================================
// Storage Keys
// ==========================================================================

/// Storage key holding the preferred language code.
pub const LANGUAGE_STORAGE_KEY: &str = "preferredLang";

/// Storage key holding the theme (`light` or `dark`).
pub const THEME_STORAGE_KEY: &str = "theme";
