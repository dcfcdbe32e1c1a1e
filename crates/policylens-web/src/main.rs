//! PolicyLens web server
//!
//! Serves the upload form and the JSON analysis API.

use policylens_web::{config::WebConfig, start_server, WebError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), WebError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        WebConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults (127.0.0.1:8080, ./data)");
        eprintln!("Usage: policylens-web --config <path-to-config.toml>");
        eprintln!();
        WebConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("PolicyLens Web - Privacy policy compliance checker");
    println!();
    println!("USAGE:");
    println!("    policylens-web [--config <path-to-config.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    policylens-web --config config/policylens.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 8080)");
    println!("    - max_upload_bytes: Largest accepted upload (default 200 MiB)");
    println!("    - [analyzer] data_dir, regulations, strict_references, max_reference_bytes");
    println!("    - [gemini] endpoint, model, timeout_secs");
    println!();
    println!("    Users enter their Gemini API key in the form; the server keeps none.");
    println!("    Set RUST_LOG (e.g. 'debug') to change log verbosity.");
    println!();
}
