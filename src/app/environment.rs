// SPDX-License-Identifier: MPL-2.0
//! System defaults used when no preference has been stored yet.

/// What the host system reports about the user's setup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// System locale, e.g. `tr-TR` or `en-US`.
    pub locale: Option<String>,
    /// Whether the system asks for a light color scheme.
    pub prefers_light: bool,
    /// Whether the system asks for reduced motion.
    pub prefers_reduced_motion: bool,
}

impl Environment {
    /// Reads the OS locale and color scheme.
    ///
    /// Reduced motion has no portable query and is left off; the CLI exposes
    /// it as a flag.
    #[must_use]
    pub fn detect() -> Self {
        let locale = sys_locale::get_locale();
        let prefers_light = matches!(dark_light::detect(), Ok(dark_light::Mode::Light));
        tracing::debug!(?locale, prefers_light, "detected system environment");
        Self {
            locale,
            prefers_light,
            prefers_reduced_motion: false,
        }
    }
}
