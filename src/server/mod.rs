//! # HTTP Server
//!
//! Combines the five function routers under `/functions` with permissive
//! CORS (preflight included) and request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::handlers::{codes, content, exercise, models, status, AppState};

/// HTTP server for the function surface
pub struct Server {
    config: AppConfig,
    router: Router,
}

impl Server {
    /// Create a server over the given application state.
    pub fn new(state: Arc<AppState>) -> Self {
        let config = state.config.clone();
        let router = Self::build_router(state);
        Self { config, router }
    }

    /// Build the combined router with all function endpoints.
    pub fn build_router(state: Arc<AppState>) -> Router {
        // Allow-all CORS; every handler answers preflight uniformly.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let functions = Router::new()
            .merge(exercise::routes(state.clone()))
            .merge(codes::routes(state.clone()))
            .merge(content::routes(state.clone()))
            .merge(models::routes(state))
            .merge(status::routes());

        Router::new()
            .nest("/functions", functions)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        println!("Starting traindeck function server on {}", addr);
        println!("Function endpoints:");
        println!("  - POST /functions/exercises - create/list/get exercises");
        println!("  - POST /functions/codes - list access codes");
        println!("  - POST /functions/content - create lessons and exercises");
        println!("  - POST /functions/models - filtered model catalog");
        println!("  - GET  /functions/status - deployment manifest");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let state = Arc::new(AppState::from_config(AppConfig::default()));
        let server = Server::new(state);
        assert_eq!(server.socket_addr(), "0.0.0.0:9400");
    }

    #[test]
    fn test_router_builds() {
        let state = Arc::new(AppState::from_config(AppConfig::with_port(8080)));
        let server = Server::new(state);
        let _router = server.router();
    }
}
