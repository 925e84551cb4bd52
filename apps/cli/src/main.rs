//! SkyDrop command-line client entry point.

mod backend;
mod cli;
mod config;
mod logging;
mod share;
mod shell;

use clap::Parser;

use crate::backend::HttpBackend;
use crate::cli::{Cli, Command};
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => CliConfig::load_from(path)?,
        None => CliConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            CliConfig::default()
        }),
    };

    let server_url = config.server_url(cli.server.as_deref());
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %server_url,
        "starting skydrop"
    );
    let backend = HttpBackend::new(&server_url)?;

    match cli.command {
        Command::Share(args) => share::run(backend, args, config.default_hours).await,
        Command::Shell => shell::run(backend, config.default_hours).await,
    }
}
