//! Site configuration for press.
//!
//! Parses `press.toml` into a validated [`SiteConfig`]: site metadata, head
//! tags, per-path locales, theme (logos and navbar) and dev-server options.
//! The resulting value is handed unchanged to the site framework, usually as
//! JSON produced by [`FrameworkConfig`].
//!
//! When no config file is given or discovered, the compiled-in site
//! definition ([`SiteConfig::bundled`]) is used.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `theme.logo`
//! - `theme.logo_dark`

mod expand;
mod framework;
mod head;
mod locale;
mod nav;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use framework::{FrameworkConfig, FrameworkLocale, FrameworkTheme, FrameworkThemeLocale};
pub use head::HeadTag;
pub use locale::{LocaleConfig, ResolvedLocale};
pub use nav::{NavItem, Walk, walk};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "press.toml";

/// Compiled-in site definition used when no config file is found.
const BUNDLED_CONFIG: &str = include_str!("bundled.toml");

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override debug flag.
    pub debug: Option<bool>,
    /// Override browser auto-open flag.
    pub open: Option<bool>,
}

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    /// Site language tag, e.g. `zh-CN`.
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Site meta description.
    pub description: String,
    /// URL prefix the site is deployed under.
    pub base: String,
    /// Static assets directory, relative to the config file.
    pub public_dir: String,
    /// Glob patterns selecting source pages.
    pub page_patterns: Vec<String>,
    /// Extra `<head>` tags.
    pub head: Vec<HeadTag>,
    /// Dev server options.
    pub server: ServerOptions,
    /// Theme configuration.
    pub theme: ThemeConfig,
    /// Per-path locale overrides, keyed by path prefix.
    pub locales: BTreeMap<String, LocaleConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

/// Dev server options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerOptions {
    /// Print extra diagnostics from the framework.
    pub debug: bool,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Open a browser on startup.
    pub open: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            debug: false,
            host: "0.0.0.0".to_owned(),
            port: 8080,
            open: false,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    /// Logo path, relative to the public directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Logo used in dark mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_dark: Option<String>,
    /// Show headers of all pages in the sidebar, not just the current one.
    pub display_all_headers: bool,
    /// Top navigation.
    pub navbar: Vec<NavItem>,
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSiteConfig {
    lang: Option<String>,
    title: Option<String>,
    description: Option<String>,
    base: Option<String>,
    public_dir: Option<String>,
    page_patterns: Option<Vec<String>>,
    head: Vec<HeadTag>,
    server: ServerOptions,
    theme: RawThemeConfig,
    locales: BTreeMap<String, locale::RawLocaleConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawThemeConfig {
    logo: Option<String>,
    logo_dark: Option<String>,
    display_all_headers: bool,
    navbar: Vec<nav::RawNavItem>,
}

/// Default page selection patterns.
pub fn default_page_patterns() -> Vec<String> {
    ["**/*.md", "!**/README.md", "!.vuepress", "!node_modules"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Framework JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`PRESS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `press.toml` in current directory and parents, falling back to the
    /// bundled site definition.
    ///
    /// CLI settings are applied before validation, so an invalid override
    /// (e.g. port 0) fails the load like an invalid file value would.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path, cli_settings);
        }

        if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            return Self::load_from_file(&discovered, cli_settings);
        }

        tracing::debug!("No {CONFIG_FILENAME} found, using bundled site definition");
        let raw: RawSiteConfig = toml::from_str(BUNDLED_CONFIG)?;
        Self::build(raw, None, cli_settings)
    }

    /// The compiled-in site definition.
    ///
    /// # Errors
    ///
    /// Returns error only if the bundled definition itself is invalid.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_CONFIG)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// Relative paths resolve against the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSiteConfig = toml::from_str(content)?;
        Self::build(raw, None, None)
    }

    /// Serialize back to `press.toml` form.
    ///
    /// # Errors
    ///
    /// Returns error if TOML serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path of the file this config was loaded from, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Static assets directory resolved against the config file location.
    pub fn resolved_public_dir(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."));
        base.join(&self.public_dir)
    }

    /// Socket address string for the dev server.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate configuration values.
    ///
    /// Called automatically during loading; use it to check a hand-built
    /// value before passing it on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_server()?;
        nav::validate_items(&self.theme.navbar, "theme.navbar")?;
        for (key, locale) in &self.locales {
            locale::validate_key(key)?;
            locale.validate(&format!("locales.\"{key}\""))?;
        }
        Ok(())
    }

    /// Validate site metadata.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_non_empty(&self.description, "description")?;
        require_non_empty(&self.lang, "lang")?;
        require_non_empty(&self.public_dir, "public_dir")?;

        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "base \"{}\" must start and end with '/'",
                self.base
            )));
        }

        for (i, pattern) in self.page_patterns.iter().enumerate() {
            require_non_empty(pattern, &format!("page_patterns[{i}]"))?;
        }

        head::validate_tags(&self.head, "head")
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 asks the OS for a random port, which the framework never reports back
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(
        path: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: RawSiteConfig = toml::from_str(&content)?;
        Self::build(raw, Some(path.to_path_buf()), cli_settings)
    }

    /// Expand, resolve, apply overrides and validate a raw config.
    fn build(
        mut raw: RawSiteConfig,
        config_path: Option<PathBuf>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        raw.expand_env_vars()?;
        let mut config = raw.resolve()?;
        config.config_path = config_path;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(debug) = settings.debug {
            self.server.debug = debug;
        }
        if let Some(open) = settings.open {
            self.server.open = open;
        }
    }
}

impl RawSiteConfig {
    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        expand::expand_opt(&mut self.theme.logo, "theme.logo")?;
        expand::expand_opt(&mut self.theme.logo_dark, "theme.logo_dark")?;
        Ok(())
    }

    /// Fill defaults and resolve the navbar tree.
    fn resolve(self) -> Result<SiteConfig, ConfigError> {
        let navbar = nav::resolve_items(self.theme.navbar, "theme.navbar")?;

        let locales = self
            .locales
            .into_iter()
            .map(|(key, locale)| -> Result<_, ConfigError> {
                let resolved = locale.resolve(&format!("locales.\"{key}\""))?;
                Ok((key, resolved))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(SiteConfig {
            lang: self.lang.unwrap_or_else(|| "en-US".to_owned()),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            base: self.base.unwrap_or_else(|| "/".to_owned()),
            public_dir: self.public_dir.unwrap_or_else(|| "public".to_owned()),
            page_patterns: self.page_patterns.unwrap_or_else(default_page_patterns),
            head: self.head,
            server: self.server,
            theme: ThemeConfig {
                logo: self.theme.logo,
                logo_dark: self.theme.logo_dark,
                display_all_headers: self.theme.display_all_headers,
                navbar,
            },
            locales,
            config_path: None,
        })
    }
}
