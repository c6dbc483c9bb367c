//! Server builder and run_server function

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{Result, ServiceError};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ServiceError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// Loads `config/playcat.yaml` (or the path in `PLAYCAT_CONFIG`),
/// falling back to defaults plus environment overrides when the file
/// is absent.
pub async fn run_server() -> Result<()> {
    let config_path =
        std::env::var("PLAYCAT_CONFIG").unwrap_or_else(|_| "config/playcat.yaml".to_string());
    info!("Loading configuration file: {}", config_path);

    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!("Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!(
                "Configuration file unavailable ({}), using environment configuration",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    info!("Server starting at: http://{}", config.server.address());
    info!("API Endpoints:");
    info!("   GET  /health   - Health check");
    info!("   POST /classify - Batch category lookup");

    server.start().await
}
