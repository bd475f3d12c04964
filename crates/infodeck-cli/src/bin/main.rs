//! infodeck CLI binary entry point
//!
//! Installs the log subscriber and hands over to the library's `run_cli()`.

use anyhow::Result;
use infodeck_cli::run_cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_cli()
}
