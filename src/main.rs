//! NetCheck - concurrent network diagnostics
//!
//! Runs DNS, ping, TCP, HTTP(S) and TLS expiry probes in parallel and
//! prints a text report, optionally writing it as JSON too.

use clap::Parser;
use netcheck::commands::run_check;
use netcheck::output::print_error;
use netcheck::{Cli, ToolkitError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Install the ring crypto provider for rustls
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&e.to_string());
            e.downcast_ref::<ToolkitError>()
                .map(ToolkitError::exit_code)
                .unwrap_or(1)
        }
    };

    std::process::exit(code);
}

async fn run(cli: &Cli) -> anyhow::Result<i32> {
    Ok(run_check(cli).await?)
}
