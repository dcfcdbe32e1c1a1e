//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PolicyLens - Check a privacy policy against reference regulations.
#[derive(Debug, Parser)]
#[command(name = "policylens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.policylens/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the reference documents
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a policy document (.pdf, .docx, .txt)
    Analyze(AnalyzeArgs),

    /// List the reference documents that would be sent
    References,

    /// Print the prompt for a policy without calling the model
    Prompt(PromptArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Policy document to analyze
    pub file: PathBuf,

    /// Gemini API key
    #[arg(short = 'k', long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model to use instead of the configured one
    #[arg(short, long)]
    pub model: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when any reference document is unreadable
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Policy document
    pub file: PathBuf,

    /// Write the prompt to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "policylens",
            "analyze",
            "policy.pdf",
            "--api-key",
            "abc",
            "--model",
            "gemini-1.5-pro",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.file, PathBuf::from("policy.pdf"));
                assert_eq!(args.api_key.as_deref(), Some("abc"));
                assert_eq!(args.model.as_deref(), Some("gemini-1.5-pro"));
                assert!(!args.strict);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["policylens", "references", "--data-dir", "/srv/data", "-f", "json"]);
        assert!(matches!(cli.command, Command::References));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/data")));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["policylens", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["policylens"]).is_err());
    }
}
