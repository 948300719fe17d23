//! CLI command implementations

use std::sync::Arc;

use crate::config::AppConfig;
use crate::handlers::{status, AppState};
use crate::server::Server;

use super::errors::{CliError, CliResult};

/// Start the HTTP function server.
///
/// Configuration comes from the environment; host/port flags override it.
pub fn serve(host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = AppConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let state = Arc::new(AppState::from_config(config));
    let server = Server::new(state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the deployment-status manifest.
pub fn manifest() -> CliResult<()> {
    let manifest = status::manifest();
    let rendered =
        serde_json::to_string_pretty(&manifest).map_err(|e| CliError::Render(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
