//! `press export` command implementation.
//!
//! Writes the validated configuration as framework JSON, the artifact the
//! site framework is started with.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use press_config::{FrameworkConfig, SiteConfig};

use super::LoadArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    load: LoadArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.load.load()?;
        let json = render(&config, !self.compact)?;

        match &self.output {
            Some(path) => {
                write_file(path, &json)?;
                Output::new().success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

fn render(config: &SiteConfig, pretty: bool) -> Result<String, CliError> {
    Ok(FrameworkConfig::from(config).to_json(pretty)?)
}

/// Write JSON to `path`, creating parent directories.
fn write_file(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    tracing::info!(path = %path.display(), bytes = json.len(), "Writing framework config");
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_compact_is_single_line() {
        let config = SiteConfig::bundled().unwrap();
        let json = render(&config, false).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#""logoDark":"/img/logo.jpg""#));
    }

    #[test]
    fn test_write_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/.press/config.json");
        let config = SiteConfig::bundled().unwrap();

        write_file(&path, &render(&config, true).unwrap()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed = FrameworkConfig::from_json(&written).unwrap();
        assert_eq!(SiteConfig::try_from(parsed).unwrap(), config);
    }
}
