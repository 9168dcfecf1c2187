//! Tubedeck CLI - build, run and bootstrap the YouTube Downloader app

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tubedeck_cli::cli::Cli;
use tubedeck_cli::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json_mode {
                match json::format_command_error(&e) {
                    Ok(s) => println!("{s}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
