//! Per-path locale overrides.
//!
//! A locale entry is keyed by a path prefix such as `/en/`. For a given page
//! path the longest matching key is selected, and every field set in that
//! entry wins over the top-level value. Unset fields fall back to the
//! top-level configuration. Locale head tags are appended after the
//! top-level ones.

use serde::{Deserialize, Serialize};

use crate::head::{HeadTag, validate_tags};
use crate::nav::{NavItem, RawNavItem, resolve_items, validate_items};
use crate::{ConfigError, SiteConfig, require_non_empty};

/// Overrides for pages under one path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra head tags for this locale.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
    /// Replacement navbar for this locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Vec<NavItem>>,
}

impl LocaleConfig {
    pub(crate) fn validate(&self, path: &str) -> Result<(), ConfigError> {
        for (value, field) in [
            (&self.lang, "lang"),
            (&self.title, "title"),
            (&self.description, "description"),
        ] {
            if let Some(value) = value {
                require_non_empty(value, &format!("{path}.{field}"))?;
            }
        }
        validate_tags(&self.head, &format!("{path}.head"))?;
        if let Some(navbar) = &self.navbar {
            validate_items(navbar, &format!("{path}.navbar"))?;
        }
        Ok(())
    }
}

/// Check that a locale key is a `/`-delimited path prefix.
pub(crate) fn validate_key(key: &str) -> Result<(), ConfigError> {
    if !key.starts_with('/') || !key.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "locales key \"{key}\" must start and end with '/'"
        )));
    }
    Ok(())
}

/// Locale entry as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawLocaleConfig {
    lang: Option<String>,
    title: Option<String>,
    description: Option<String>,
    head: Vec<HeadTag>,
    navbar: Option<Vec<RawNavItem>>,
}

impl RawLocaleConfig {
    pub(crate) fn resolve(self, path: &str) -> Result<LocaleConfig, ConfigError> {
        let navbar = self
            .navbar
            .map(|items| resolve_items(items, &format!("{path}.navbar")))
            .transpose()?;
        Ok(LocaleConfig {
            lang: self.lang,
            title: self.title,
            description: self.description,
            head: self.head,
            navbar,
        })
    }
}

/// Effective site settings for one page path.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedLocale<'a> {
    /// Matched locale key, `None` when only top-level settings apply.
    pub key: Option<&'a str>,
    pub lang: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    /// Top-level tags followed by locale tags.
    pub head: Vec<&'a HeadTag>,
    pub navbar: &'a [NavItem],
}

impl SiteConfig {
    /// Resolve locale overrides for a page path.
    ///
    /// Picks the longest locale key that prefixes `path`. A key `/en/` also
    /// matches the bare `/en` path.
    pub fn locale_for(&self, path: &str) -> ResolvedLocale<'_> {
        let matched = self
            .locales
            .iter()
            .filter(|(key, _)| {
                path.starts_with(key.as_str()) || key.strip_suffix('/') == Some(path)
            })
            .max_by_key(|(key, _)| key.len());

        let Some((key, locale)) = matched else {
            return ResolvedLocale {
                key: None,
                lang: &self.lang,
                title: &self.title,
                description: &self.description,
                head: self.head.iter().collect(),
                navbar: &self.theme.navbar,
            };
        };

        ResolvedLocale {
            key: Some(key.as_str()),
            lang: locale.lang.as_deref().unwrap_or(&self.lang),
            title: locale.title.as_deref().unwrap_or(&self.title),
            description: locale.description.as_deref().unwrap_or(&self.description),
            head: self.head.iter().chain(&locale.head).collect(),
            navbar: locale.navbar.as_deref().unwrap_or(&self.theme.navbar),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MULTI_LOCALE: &str = r#"
lang = "zh-CN"
title = "前端学习站"
description = "前端学习站"
head = [["link", { rel = "icon", href = "/img/logo.jpg" }]]

[locales."/"]

[locales."/en/"]
lang = "en-US"
title = "Frontend Notes"
head = [["meta", { name = "locale", content = "en" }]]
navbar = [{ text = "Learn", link = "/en/learn/" }]

[locales."/en/legacy/"]
title = "Legacy Notes"

[[theme.navbar]]
text = "Github"
link = "https://github.com/Xi-Yuer"
"#;

    fn config() -> SiteConfig {
        SiteConfig::from_toml_str(MULTI_LOCALE).unwrap()
    }

    #[test]
    fn test_root_locale_uses_top_level_values() {
        let config = config();
        let resolved = config.locale_for("/learn/js");
        assert_eq!(resolved.key, Some("/"));
        assert_eq!(resolved.lang, "zh-CN");
        assert_eq!(resolved.title, "前端学习站");
        assert_eq!(resolved.navbar[0].text(), "Github");
        assert_eq!(resolved.head.len(), 1);
    }

    #[test]
    fn test_explicit_locale_fields_win() {
        let config = config();
        let resolved = config.locale_for("/en/learn/js");
        assert_eq!(resolved.key, Some("/en/"));
        assert_eq!(resolved.lang, "en-US");
        assert_eq!(resolved.title, "Frontend Notes");
        // Not overridden, falls back to top level
        assert_eq!(resolved.description, "前端学习站");
        assert_eq!(resolved.navbar, &[NavItem::link("Learn", "/en/learn/")]);
    }

    #[test]
    fn test_locale_head_appended_after_top_level() {
        let config = config();
        let resolved = config.locale_for("/en/");
        let tags: Vec<&str> = resolved.head.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["link", "meta"]);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let config = config();
        let resolved = config.locale_for("/en/legacy/page");
        assert_eq!(resolved.key, Some("/en/legacy/"));
        assert_eq!(resolved.title, "Legacy Notes");
        // Nested locale does not inherit from its parent locale
        assert_eq!(resolved.lang, "zh-CN");
    }

    #[test]
    fn test_bare_prefix_path_matches() {
        let config = config();
        assert_eq!(config.locale_for("/en").key, Some("/en/"));
    }

    #[test]
    fn test_no_locales_falls_back_to_top_level() {
        let config = SiteConfig::bundled().unwrap();
        let resolved = config.locale_for("/learn/go");
        assert_eq!(resolved.key, None);
        assert_eq!(resolved.title, "前端学习站");
        assert_eq!(resolved.navbar.len(), config.theme.navbar.len());
    }

    #[test]
    fn test_invalid_locale_key_rejected() {
        let err = SiteConfig::from_toml_str(
            r#"
title = "t"
description = "d"
[locales.en]
lang = "en-US"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("\"en\""));
    }

    #[test]
    fn test_locale_navbar_error_names_locale() {
        let err = SiteConfig::from_toml_str(
            r#"
title = "t"
description = "d"
[locales."/en/"]
navbar = [{ text = "Broken" }]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("locales.\"/en/\".navbar[0]"));
    }

    #[test]
    fn test_empty_locale_title_rejected() {
        let err = SiteConfig::from_toml_str(
            r#"
title = "t"
description = "d"
[locales."/en/"]
title = ""
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("locales.\"/en/\".title"));
    }
}
