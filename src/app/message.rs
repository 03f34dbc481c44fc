// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

/// Messages consumed by `App::update`, produced by the event binder from
/// host events.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A language toggle was activated.
    LanguageSelected(String),
    /// The theme button was activated.
    ThemeToggled,
    /// The menu button was activated.
    MenuToggled,
    /// Something inside the navigation container was clicked.
    /// `on_anchor` is true when the clicked node itself is a link.
    NavClicked { on_anchor: bool },
    /// The window scrolled to `scroll_y`.
    Scrolled { scroll_y: f32 },
    /// The host is about to paint a frame.
    AnimationFrame,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Language to switch to after loading, as if its toggle had been clicked.
    pub lang: Option<String>,
    /// Content document location (path or URL). Overrides `settings.toml`.
    pub content: Option<String>,
    /// Page scaffold to render into instead of the bundled one.
    pub page: Option<String>,
    /// File to write the rendered page to. Stdout when unset.
    pub output: Option<String>,
    /// Flip the stored theme once after startup.
    pub toggle_theme: bool,
    /// Report a reduced-motion preference to the page.
    pub reduced_motion: bool,
    /// Optional data directory override (for the preference store).
    /// Takes precedence over `VITRINE_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `VITRINE_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
