//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;

use std::path::PathBuf;

use clap::Args;
use press_config::{CliSettings, SiteConfig};

use crate::error::CliError;

/// Config location and dev-server overrides shared by all commands.
#[derive(Args)]
pub(crate) struct LoadArgs {
    /// Path to configuration file (default: auto-discover press.toml).
    #[arg(short, long, env = "PRESS_CONFIG")]
    config: Option<PathBuf>,

    /// Dev server host (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Dev server port (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable framework debug output.
    #[arg(long)]
    debug: bool,

    /// Open a browser when the dev server starts.
    #[arg(long)]
    open: bool,

    /// Never open a browser.
    #[arg(long, conflicts_with = "open")]
    no_open: bool,
}

impl LoadArgs {
    /// Load and validate the site configuration.
    pub(crate) fn load(&self) -> Result<SiteConfig, CliError> {
        let settings = self.cli_settings();
        Ok(SiteConfig::load(self.config.as_deref(), Some(&settings))?)
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            debug: self.debug.then_some(true),
            open: self.resolve_open(),
        }
    }

    /// Resolve `open` from --open/--no-open flags.
    fn resolve_open(&self) -> Option<bool> {
        if self.no_open {
            Some(false)
        } else {
            self.open.then_some(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        load: LoadArgs,
    }

    #[test]
    fn test_no_flags_override_nothing() {
        let cli = TestCli::parse_from(["press"]);
        let settings = cli.load.cli_settings();
        assert!(settings.host.is_none());
        assert!(settings.port.is_none());
        assert!(settings.debug.is_none());
        assert!(settings.open.is_none());
    }

    #[test]
    fn test_flags_become_settings() {
        let cli = TestCli::parse_from([
            "press", "--host", "127.0.0.1", "-p", "3000", "--debug", "--open",
        ]);
        let settings = cli.load.cli_settings();
        assert_eq!(settings.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(settings.port, Some(3000));
        assert_eq!(settings.debug, Some(true));
        assert_eq!(settings.open, Some(true));
    }

    #[test]
    fn test_no_open_wins() {
        let cli = TestCli::parse_from(["press", "--no-open"]);
        assert_eq!(cli.load.resolve_open(), Some(false));
    }

    #[test]
    fn test_open_conflicts_with_no_open() {
        assert!(TestCli::try_parse_from(["press", "--open", "--no-open"]).is_err());
    }
}
