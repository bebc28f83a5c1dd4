//! `press check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use press_config::{NavItem, SiteConfig, walk};

use super::LoadArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    load: LoadArgs,

    /// Skip printing the navbar tree.
    #[arg(long)]
    quiet: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.load.load()?;

        match config.config_path() {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: bundled site definition"),
        }

        output.highlight(&format!("{} ({})", config.title, config.lang));
        output.info(&format!("Description: {}", config.description));
        output.info(&format!("Base: {}", config.base));
        output.info(&format!("Dev server: {}", config.server_addr()));
        output.info(&format!(
            "Debug: {}, open browser: {}",
            on_off(config.server.debug),
            on_off(config.server.open)
        ));
        if config.locales.is_empty() {
            output.info("Locales: none");
        } else {
            let keys: Vec<&str> = config.locales.keys().map(String::as_str).collect();
            output.info(&format!("Locales: {}", keys.join(", ")));
        }

        if !self.quiet {
            output.info("Navbar:");
            for line in nav_tree_lines(&config.theme.navbar) {
                output.muted(&line);
            }
        }

        let missing = missing_logos(&config);
        for path in &missing {
            tracing::warn!(path = %path.display(), "Logo file not found");
            output.warning(&format!("Logo not found: {}", path.display()));
        }

        let items = walk(&config.theme.navbar).count();
        output.success(&format!(
            "Configuration OK ({items} navbar entries, {} warnings)",
            missing.len()
        ));
        Ok(())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Render the navbar as indented lines.
fn nav_tree_lines(items: &[NavItem]) -> Vec<String> {
    walk(items)
        .map(|(item, level)| {
            let indent = "  ".repeat(level + 1);
            match item.link_target() {
                Some(link) => format!("{indent}{} -> {link}", item.text()),
                None => format!("{indent}{}/", item.text()),
            }
        })
        .collect()
}

/// Local logo files that do not exist under the public directory.
///
/// Remote logos (`http://`, `https://`) are not checked.
fn missing_logos(config: &SiteConfig) -> Vec<PathBuf> {
    let public_dir = config.resolved_public_dir();
    let mut logos: Vec<&str> = [&config.theme.logo, &config.theme.logo_dark]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect();
    logos.dedup();

    logos
        .into_iter()
        .filter(|logo| !logo.starts_with("http://") && !logo.starts_with("https://"))
        .map(|logo| logo_path(&public_dir, logo))
        .filter(|path| !path.exists())
        .collect()
}

/// Resolve a site-absolute logo path against the public directory.
fn logo_path(public_dir: &Path, logo: &str) -> PathBuf {
    public_dir.join(logo.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use press_config::CONFIG_FILENAME;

    use super::*;

    #[test]
    fn test_nav_tree_lines() {
        let items = vec![
            NavItem::link("Github", "https://github.com/Xi-Yuer"),
            NavItem::group(
                "后端学习",
                vec![
                    NavItem::link("Go", "/learn/go"),
                    NavItem::link("Docker", "/learn/docker"),
                ],
            ),
        ];
        assert_eq!(
            nav_tree_lines(&items),
            vec![
                "  Github -> https://github.com/Xi-Yuer",
                "  后端学习/",
                "    Go -> /learn/go",
                "    Docker -> /learn/docker",
            ]
        );
    }

    #[test]
    fn test_logo_path_strips_leading_slash() {
        assert_eq!(
            logo_path(Path::new("/site/public"), "/img/logo.jpg"),
            PathBuf::from("/site/public/img/logo.jpg")
        );
    }

    #[test]
    fn test_missing_logos_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
title = "t"
description = "d"
[theme]
logo = "/img/logo.jpg"
logo_dark = "/img/logo.jpg"
"#,
        )
        .unwrap();
        let config = SiteConfig::load(Some(&path), None).unwrap();

        assert_eq!(
            missing_logos(&config),
            vec![dir.path().join("public/img/logo.jpg")]
        );

        std::fs::create_dir_all(dir.path().join("public/img")).unwrap();
        std::fs::write(dir.path().join("public/img/logo.jpg"), b"jpg").unwrap();
        assert!(missing_logos(&config).is_empty());
    }

    #[test]
    fn test_remote_logo_not_checked() {
        let config = SiteConfig::from_toml_str(
            r#"
title = "t"
description = "d"
[theme]
logo = "https://example.com/logo.png"
"#,
        )
        .unwrap();
        assert!(missing_logos(&config).is_empty());
    }
}
