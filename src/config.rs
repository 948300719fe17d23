//! Application configuration
//!
//! Server bind settings plus the credentials the handlers need: the row
//! store URL, the privileged service key, and the model-catalog API key.
//! Everything is read from the environment; bind settings have defaults.

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 9400)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the external row store (e.g. "https://db.example.com/rest/v1")
    pub store_url: Option<String>,

    /// Privileged service key for the row store (bypasses row-level security)
    pub service_key: Option<String>,

    /// API key for the external model-catalog endpoint
    pub models_api_key: Option<String>,

    /// Base URL of the model-catalog API (default: "https://api.openai.com")
    #[serde(default = "default_models_api_url")]
    pub models_api_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9400
}

fn default_models_api_url() -> String {
    "https://api.openai.com".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store_url: None,
            service_key: None,
            models_api_key: None,
            models_api_url: default_models_api_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("TRAINDECK_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("TRAINDECK_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        config.store_url = std::env::var("TRAINDECK_STORE_URL").ok();
        config.service_key = std::env::var("TRAINDECK_SERVICE_KEY").ok();
        config.models_api_key = std::env::var("OPENAI_API_KEY").ok();
        if let Ok(url) = std::env::var("TRAINDECK_MODELS_API_URL") {
            config.models_api_url = url;
        }
        config
    }

    /// Create a config with a specific port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
