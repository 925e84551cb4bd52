//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// skydrop - share files through short-lived download links.
#[derive(Debug, Parser)]
#[command(
    name = "skydrop",
    version,
    about = "skydrop - share files through short-lived download links"
)]
pub struct Cli {
    /// Server base URL (overrides the config file)
    #[arg(short = 's', long = "server", env = "SKYDROP_SERVER", value_name = "URL")]
    pub server: Option<String>,

    /// Config file (default: ~/.config/skydrop/config.json)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload files once and print the download link
    Share(ShareArgs),

    /// Interactive session reading commands from stdin
    Shell,
}

#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Files to upload; several files are bundled into one archive
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Retention period in hours (1-24)
    #[arg(long = "hours", value_name = "N")]
    pub hours: Option<String>,

    /// Save the QR code image to this path
    #[arg(long = "qr-out", value_name = "FILE")]
    pub qr_out: Option<PathBuf>,
}
