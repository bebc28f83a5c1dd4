//! Extra `<head>` tags injected into every page.
//!
//! Written as `[tag, attrs]` or `[tag, attrs, content]` arrays, matching the
//! shape the site framework expects:
//!
//! ```toml
//! head = [
//!     ["link", { rel = "icon", href = "/img/logo.jpg" }],
//!     ["script", {}, "console.log('hi')"],
//! ]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A single head tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HeadTagRepr", into = "HeadTagRepr")]
pub struct HeadTag {
    /// Element name (`link`, `meta`, `script`, ...).
    pub tag: String,
    /// Attributes, rendered in key order.
    pub attrs: BTreeMap<String, String>,
    /// Inner content for elements like `script` and `style`.
    pub content: Option<String>,
}

impl HeadTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            content: None,
        }
    }

    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Check that the tag name is a plausible HTML element name.
    pub(crate) fn validate(&self, path: &str) -> Result<(), ConfigError> {
        if self.tag.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{path} tag name cannot be empty"
            )));
        }
        if !self.tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "{path} has invalid tag name `{}`",
                self.tag
            )));
        }
        if self.attrs.keys().any(String::is_empty) {
            return Err(ConfigError::Validation(format!(
                "{path} has an empty attribute name"
            )));
        }
        Ok(())
    }
}

/// Validate a list of head tags rooted at `path`.
pub(crate) fn validate_tags(tags: &[HeadTag], path: &str) -> Result<(), ConfigError> {
    tags.iter()
        .enumerate()
        .try_for_each(|(i, tag)| tag.validate(&format!("{path}[{i}]")))
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HeadTagRepr {
    WithContent(String, BTreeMap<String, String>, String),
    Bare(String, BTreeMap<String, String>),
}

impl From<HeadTagRepr> for HeadTag {
    fn from(repr: HeadTagRepr) -> Self {
        match repr {
            HeadTagRepr::WithContent(tag, attrs, content) => Self {
                tag,
                attrs,
                content: Some(content),
            },
            HeadTagRepr::Bare(tag, attrs) => Self {
                tag,
                attrs,
                content: None,
            },
        }
    }
}

impl From<HeadTag> for HeadTagRepr {
    fn from(tag: HeadTag) -> Self {
        match tag.content {
            Some(content) => Self::WithContent(tag.tag, tag.attrs, content),
            None => Self::Bare(tag.tag, tag.attrs),
        }
    }
}
