//! jdx CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use jdx::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the jdx CLI.
///
/// Uses tokio's `current_thread` runtime: the only async work is reading the
/// data and configuration files and stdin.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over -v, e.g. RUST_LOG=jdx=debug,jdx_data=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting jdx CLI");

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
