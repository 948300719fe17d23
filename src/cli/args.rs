//! CLI argument definitions using clap
//!
//! Commands:
//! - traindeck serve [--host <host>] [--port <port>]
//! - traindeck manifest

use clap::{Parser, Subcommand};

/// traindeck - HTTP function backend for training exercises
#[derive(Parser, Debug)]
#[command(name = "traindeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP function server
    Serve {
        /// Host to bind to (overrides TRAINDECK_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides TRAINDECK_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the deployment-status manifest and exit
    Manifest,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
