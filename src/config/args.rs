//! Command-line argument parsing

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "qrlinker", version, about = "Dynamic QR code redirect service")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a sample configuration file to stdout
    GenerateConfig,
}

impl Cli {
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
