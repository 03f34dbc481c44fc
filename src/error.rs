// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Page(String),
    Content(ContentError),
    Render(RenderError),
}

/// Failures while fetching or decoding the localized content document.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentError {
    /// The resource could not be read (missing file, network failure, non-2xx status).
    Fetch(String),

    /// The resource was read but is not a valid content document.
    Parse(String),

    /// The bundled default document is missing from the binary.
    MissingEmbedded(String),
}

/// Failures that abort a render pass.
///
/// Anything reported here stops the pass at the step where it occurred;
/// work done by earlier steps is left in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Neither the requested language nor the fallback language is present.
    MissingLanguage(String),

    /// A required element id is absent from the page.
    MissingElement(&'static str),

    /// A structured section is absent or does not have its expected shape.
    Section {
        section: &'static str,
        reason: String,
    },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Fetch(msg) => write!(f, "failed to fetch content: {}", msg),
            ContentError::Parse(msg) => write!(f, "failed to parse content: {}", msg),
            ContentError::MissingEmbedded(name) => {
                write!(f, "bundled content not found: {}", name)
            }
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingLanguage(lang) => {
                write!(f, "no content for language '{}' or fallback", lang)
            }
            RenderError::MissingElement(id) => write!(f, "missing page element #{}", id),
            RenderError::Section { section, reason } => {
                write!(f, "cannot render section '{}': {}", section, reason)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Page(e) => write!(f, "Page Error: {}", e),
            Error::Content(e) => write!(f, "Content Error: {}", e),
            Error::Render(e) => write!(f, "Render Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ContentError> for Error {
    fn from(err: ContentError) -> Self {
        Error::Content(err)
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Error::Render(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
