// SPDX-License-Identifier: MPL-2.0
//! Typed records for the structured sections of a content tree.
//!
//! A structured section is an object holding one array of entries, decoded
//! entry by entry so a bad entry only stops the section at that point. Lists
//! and section objects are required. Scalar text is lenient: numbers and
//! booleans are printed, `null` and absent fields become the empty string.

use crate::error::RenderError;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Decodes the top-level section `name` of a content tree.
pub fn section<T: DeserializeOwned>(tree: &Value, name: &'static str) -> Result<T, RenderError> {
    let value = tree.get(name).ok_or_else(|| missing(name, "section is missing"))?;
    T::deserialize(value).map_err(|err| RenderError::Section {
        section: name,
        reason: err.to_string(),
    })
}

/// Raw entries of the array `list` inside section `name`, e.g.
/// `skills.categories`.
pub fn entries<'a>(
    tree: &'a Value,
    name: &'static str,
    list: &str,
) -> Result<&'a [Value], RenderError> {
    let section = tree.get(name).ok_or_else(|| missing(name, "section is missing"))?;
    match section.get(list) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(missing(name, &format!("`{list}` is not a list"))),
        None => Err(missing(name, &format!("missing field `{list}`"))),
    }
}

/// Decodes one entry of section `name`.
pub fn entry<T: DeserializeOwned>(value: &Value, name: &'static str) -> Result<T, RenderError> {
    T::deserialize(value).map_err(|err| RenderError::Section {
        section: name,
        reason: err.to_string(),
    })
}

fn missing(section: &'static str, reason: &str) -> RenderError {
    RenderError::Section {
        section,
        reason: reason.to_string(),
    }
}

/// Prints a JSON scalar the way it shows up on the page.
fn scalar_text<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Array(_) | Value::Object(_) => Err(E::custom("expected text, found a list or object")),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => scalar_text(value).map(Some),
    }
}

fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(scalar_text).collect(),
        _ => Err(serde::de::Error::custom("expected a list")),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillCategory {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text_list")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "text")]
    pub role: String,
    #[serde(default, deserialize_with = "text")]
    pub company: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub period: String,
    #[serde(deserialize_with = "text_list")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "text_list")]
    pub tech: Vec<String>,
    #[serde(default)]
    pub links: Option<ProjectLinks>,
}

impl Project {
    /// Repository link, if one is set and non-empty.
    #[must_use]
    pub fn repo(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.repo.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Live demo link, if one is set and non-empty.
    #[must_use]
    pub fn demo(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.demo.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProjectLinks {
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "text")]
    pub institution: String,
    #[serde(default, deserialize_with = "text")]
    pub degree: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub period: String,
    #[serde(default, deserialize_with = "text")]
    pub details: String,
}

/// One line of the certificate list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Certificate(#[serde(deserialize_with = "text")] pub String);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct About {
    pub details: AboutDetails,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AboutDetails {
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
    #[serde(default, deserialize_with = "text")]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "text")]
    pub location: String,
}

/// Page metadata. Absent or `null` fields leave the page untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, deserialize_with = "optional_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub og_title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub og_description: Option<String>,
}
