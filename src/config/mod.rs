//! Configuration management for the service
//!
//! This module handles loading and validation of all service
//! configuration: the HTTP server, the catalog database, and the
//! Play Store scraper.

pub mod models;

pub use models::{DatabaseConfig, ScraperConfig, ServerConfig};

use std::path::Path;

use tracing::{debug, info};

use crate::utils::error::{Result, ServiceError};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Catalog database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Play Store scraper configuration
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::config(format!("Failed to read config file: {e}")))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ServiceError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults plus environment overrides
    ///
    /// Recognized variables: `PORT`, `HOST`, `DATABASE_URL`,
    /// `PLAY_LANG`, `PLAY_COUNTRY`, `SCRAPE_DELAY_MS`.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ServiceError::config(format!("Invalid PORT value: {port}")))?;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(lang) = std::env::var("PLAY_LANG") {
            config.scraper.lang = lang;
        }
        if let Ok(country) = std::env::var("PLAY_COUNTRY") {
            config.scraper.country = country;
        }
        if let Ok(delay) = std::env::var("SCRAPE_DELAY_MS") {
            config.scraper.request_delay_ms = delay.parse().map_err(|_| {
                ServiceError::config(format!("Invalid SCRAPE_DELAY_MS value: {delay}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.server.host.is_empty() {
            return Err(ServiceError::config("Server host must not be empty"));
        }
        if self.database.url.is_empty() {
            return Err(ServiceError::config("Database URL must not be empty"));
        }
        if self.scraper.lang.is_empty() || self.scraper.country.is_empty() {
            return Err(ServiceError::config(
                "Scraper locale (lang/country) must not be empty",
            ));
        }
        if !self.scraper.base_url.starts_with("http") {
            return Err(ServiceError::config(format!(
                "Scraper base URL must be an http(s) URL: {}",
                self.scraper.base_url
            )));
        }

        debug!("Configuration validation completed");
        Ok(())
    }
}
