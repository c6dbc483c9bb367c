//! HTTP server core implementation

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::core::resolver::CategoryResolver;
use crate::scraper::PlayStoreScraper;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::Catalog;
use crate::utils::error::{Result, ServiceError};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Opens the catalog database (running migrations), builds the
    /// store scraper, and wires both into the resolver.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let catalog = Catalog::new(&config.database).await?;
        catalog.migrate().await?;

        let scraper = PlayStoreScraper::new(&config.scraper)?;
        let resolver = CategoryResolver::new(Arc::new(catalog), Arc::new(scraper));

        let state = AppState::new(config.clone(), resolver);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                // The API is consumed from browser frontends on other
                // origins, so CORS stays wide open.
                .wrap(Cors::permissive())
                .wrap(Logger::default())
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .map_err(|e| ServiceError::config(format!("Failed to bind {bind_addr}: {e}")))?
        .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ServiceError::internal(format!("Server error: {e}")))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
