//! PolicyLens CLI - Check a privacy policy against reference regulations.

use clap::Parser;
use policylens_cli::commands;
use policylens_cli::config::OutputFormat;
use policylens_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let color_hint = !cli.no_color;
    if let Err(e) = run(cli) {
        let formatter = Formatter::new(OutputFormat::Text, color_hint);
        eprintln!("{}", formatter.error(&e.to_string()));
        if let Some(hint) = e.hint() {
            eprintln!("{}", formatter.info(hint));
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> policylens_cli::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };

    let mut config = Config::load_from(&config_path)?;

    // Command-line overrides
    if let Some(data_dir) = cli.data_dir {
        config.analyzer.data_dir = data_dir;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter),
        Command::References => commands::execute_references(&config, &formatter),
        Command::Prompt(args) => commands::execute_prompt(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args.action, &config, &config_path, &formatter)
        }
    }
}
