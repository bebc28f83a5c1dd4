//! Navigation tree.
//!
//! A [`NavItem`] is either a clickable leaf (`text` + `link`) or an
//! expandable group (`text` + `children`). The two shapes are separate enum
//! variants, so a constructed item can never carry both or neither.
//!
//! Config files are parsed into [`RawNavItem`] first, where both fields are
//! optional, and then resolved with the item's position in the tree so that
//! errors name the offending entry (e.g. `theme.navbar[2].children[4]`).

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ConfigError, require_non_empty};

/// Navigation menu node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    /// Leaf entry pointing at an internal path or external URL.
    Link {
        /// Display text.
        text: String,
        /// Target, not validated as a URL.
        link: String,
    },
    /// Dropdown group of nested entries.
    Group {
        /// Display text.
        text: String,
        /// Nested entries in display order.
        children: Vec<NavItem>,
    },
}

impl NavItem {
    /// Create a leaf entry.
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Create a group entry.
    pub fn group(text: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self::Group {
            text: text.into(),
            children,
        }
    }

    /// Display text.
    pub fn text(&self) -> &str {
        match self {
            Self::Link { text, .. } | Self::Group { text, .. } => text,
        }
    }

    /// Link target for leaf entries.
    pub fn link_target(&self) -> Option<&str> {
        match self {
            Self::Link { link, .. } => Some(link),
            Self::Group { .. } => None,
        }
    }

    /// Nested entries for groups.
    pub fn children(&self) -> Option<&[NavItem]> {
        match self {
            Self::Link { .. } => None,
            Self::Group { children, .. } => Some(children),
        }
    }

    /// Whether this is a leaf entry.
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// Nesting depth: 1 for a leaf, 1 + deepest child for a group.
    pub fn depth(&self) -> usize {
        match self {
            Self::Link { .. } => 1,
            Self::Group { children, .. } => {
                1 + children.iter().map(NavItem::depth).max().unwrap_or(0)
            }
        }
    }

    /// Check invariants on a hand-built item.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming `path` if text or link is
    /// empty, or if a group has no children.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        require_non_empty(self.text(), &format!("{path}.text"))?;
        match self {
            Self::Link { link, .. } => require_non_empty(link, &format!("{path}.link")),
            Self::Group { children, .. } => {
                if children.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "{path}.children cannot be empty"
                    )));
                }
                validate_items(children, &format!("{path}.children"))
            }
        }
    }
}

/// Validate a list of items rooted at `path` (e.g. `theme.navbar`).
pub(crate) fn validate_items(items: &[NavItem], path: &str) -> Result<(), ConfigError> {
    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| item.validate(&format!("{path}[{i}]")))
}

/// Pre-order traversal over a navbar.
///
/// Yields every item together with its nesting level (0 for top-level).
pub fn walk(items: &[NavItem]) -> Walk<'_> {
    Walk {
        stack: items.iter().rev().map(|item| (item, 0)).collect(),
    }
}

/// Iterator returned by [`walk`].
pub struct Walk<'a> {
    stack: Vec<(&'a NavItem, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a NavItem, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (item, level) = self.stack.pop()?;
        if let NavItem::Group { children, .. } = item {
            self.stack
                .extend(children.iter().rev().map(|child| (child, level + 1)));
        }
        Some((item, level))
    }
}

/// Navbar entry as written in a config file.
#[derive(Debug, Deserialize)]
pub(crate) struct RawNavItem {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNavItem>>,
}

impl RawNavItem {
    /// Resolve into a [`NavItem`], enforcing link/children exclusivity.
    pub(crate) fn resolve(self, path: &str) -> Result<NavItem, ConfigError> {
        let text = self.text.unwrap_or_default();
        require_non_empty(&text, &format!("{path}.text"))?;

        match (self.link, self.children) {
            (Some(link), None) => {
                require_non_empty(&link, &format!("{path}.link"))?;
                Ok(NavItem::Link { text, link })
            }
            (None, Some(children)) => {
                if children.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "{path}.children cannot be empty"
                    )));
                }
                let children = resolve_items(children, &format!("{path}.children"))?;
                Ok(NavItem::Group { text, children })
            }
            (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
                "{path} ({text}) cannot have both `link` and `children`"
            ))),
            (None, None) => Err(ConfigError::Validation(format!(
                "{path} ({text}) must have either `link` or `children`"
            ))),
        }
    }
}

/// Resolve a raw list rooted at `path`.
pub(crate) fn resolve_items(
    items: Vec<RawNavItem>,
    path: &str,
) -> Result<Vec<NavItem>, ConfigError> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| item.resolve(&format!("{path}[{i}]")))
        .collect()
}

impl<'de> Deserialize<'de> for NavItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawNavItem::deserialize(deserializer)?
            .resolve("navbar")
            .map_err(serde::de::Error::custom)
    }
}
