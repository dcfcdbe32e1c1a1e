//! Config command implementation.

use crate::cli::ConfigAction;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute a config action.
///
/// `config` is the effective configuration (file plus command-line
/// overrides); `path` is where the file lives.
pub fn execute_config(
    action: ConfigAction,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
    }
    Ok(())
}

/// Write the default configuration, refusing to clobber an existing file.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}
