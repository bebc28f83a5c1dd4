//! Hand-off representation for the site framework.
//!
//! The framework reads a single JSON object with camelCase keys, dev-server
//! options at the top level and per-locale navbars under `theme.locales`.
//! [`FrameworkConfig`] mirrors that shape exactly and converts losslessly to
//! and from [`SiteConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, HeadTag, LocaleConfig, NavItem, ServerOptions, SiteConfig, ThemeConfig,
    default_page_patterns,
};

/// Site configuration in the framework's own shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkConfig {
    pub lang: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default)]
    pub head: Vec<HeadTag>,
    #[serde(default)]
    pub locales: BTreeMap<String, FrameworkLocale>,
    #[serde(default)]
    pub theme: FrameworkTheme,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub open: bool,
    #[serde(default = "default_page_patterns")]
    pub page_patterns: Vec<String>,
    /// Static assets directory.
    #[serde(default = "default_public")]
    pub public: String,
}

/// Site-level locale fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkLocale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
}

/// Default theme options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameworkTheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_dark: Option<String>,
    pub display_all_headers: bool,
    pub navbar: Vec<NavItem>,
    /// Theme-level locale fields, keyed like the site locales.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, FrameworkThemeLocale>,
}

/// Theme-level locale fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkThemeLocale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar: Option<Vec<NavItem>>,
}

fn default_base() -> String {
    "/".to_owned()
}

fn default_host() -> String {
    ServerOptions::default().host
}

fn default_port() -> u16 {
    ServerOptions::default().port
}

fn default_public() -> String {
    "public".to_owned()
}

impl FrameworkConfig {
    /// Render as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, ConfigError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse from JSON.
    ///
    /// Navbar items are checked for link/children exclusivity while parsing;
    /// the remaining invariants are checked when converting to [`SiteConfig`].
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&SiteConfig> for FrameworkConfig {
    fn from(config: &SiteConfig) -> Self {
        let locales = config
            .locales
            .iter()
            .map(|(key, locale)| {
                let site = FrameworkLocale {
                    lang: locale.lang.clone(),
                    title: locale.title.clone(),
                    description: locale.description.clone(),
                    head: locale.head.clone(),
                };
                (key.clone(), site)
            })
            .collect();

        let theme_locales = config
            .locales
            .iter()
            .filter(|(_, locale)| locale.navbar.is_some())
            .map(|(key, locale)| {
                let theme = FrameworkThemeLocale {
                    navbar: locale.navbar.clone(),
                };
                (key.clone(), theme)
            })
            .collect();

        Self {
            lang: config.lang.clone(),
            title: config.title.clone(),
            description: config.description.clone(),
            base: config.base.clone(),
            head: config.head.clone(),
            locales,
            theme: FrameworkTheme {
                logo: config.theme.logo.clone(),
                logo_dark: config.theme.logo_dark.clone(),
                display_all_headers: config.theme.display_all_headers,
                navbar: config.theme.navbar.clone(),
                locales: theme_locales,
            },
            debug: config.server.debug,
            host: config.server.host.clone(),
            port: config.server.port,
            open: config.server.open,
            page_patterns: config.page_patterns.clone(),
            public: config.public_dir.clone(),
        }
    }
}

impl TryFrom<FrameworkConfig> for SiteConfig {
    type Error = ConfigError;

    fn try_from(framework: FrameworkConfig) -> Result<Self, Self::Error> {
        let FrameworkTheme {
            logo,
            logo_dark,
            display_all_headers,
            navbar,
            locales: mut theme_locales,
        } = framework.theme;

        let mut locales: BTreeMap<String, LocaleConfig> = framework
            .locales
            .into_iter()
            .map(|(key, site)| {
                let navbar = theme_locales.remove(&key).and_then(|theme| theme.navbar);
                let locale = LocaleConfig {
                    lang: site.lang,
                    title: site.title,
                    description: site.description,
                    head: site.head,
                    navbar,
                };
                (key, locale)
            })
            .collect();

        // Theme-only locales still carry a navbar override
        for (key, theme) in theme_locales {
            locales.insert(
                key,
                LocaleConfig {
                    navbar: theme.navbar,
                    ..LocaleConfig::default()
                },
            );
        }

        let config = SiteConfig {
            lang: framework.lang,
            title: framework.title,
            description: framework.description,
            base: framework.base,
            public_dir: framework.public,
            page_patterns: framework.page_patterns,
            head: framework.head,
            server: ServerOptions {
                debug: framework.debug,
                host: framework.host,
                port: framework.port,
                open: framework.open,
            },
            theme: ThemeConfig {
                logo,
                logo_dark,
                display_all_headers,
                navbar,
            },
            locales,
            config_path: None,
        };
        config.validate()?;
        Ok(config)
    }
}
