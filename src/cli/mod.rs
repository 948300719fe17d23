//! CLI module for traindeck
//!
//! Provides the command-line interface:
//! - serve: start the HTTP function server
//! - manifest: print the deployment-status manifest

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse_args();
    match cli.command {
        Command::Serve { host, port } => commands::serve(host, port),
        Command::Manifest => commands::manifest(),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
