//! Configuration models

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://playcat.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_base_url() -> String {
    "https://play.google.com".to_string()
}

fn default_lang() -> String {
    "ko".to_string()
}

fn default_country() -> String {
    "kr".to_string()
}

fn default_request_delay_ms() -> u64 {
    200
}

fn default_request_timeout() -> u64 {
    15
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Catalog database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (sqlite or postgres)
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

/// Play Store scraper configuration
///
/// The locale is fixed at configuration time; every details page is
/// requested with the same `hl`/`gl` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL of the store frontend (overridable for tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Store language code (`hl` query parameter)
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Store country code (`gl` query parameter)
    #[serde(default = "default_country")]
    pub country: String,
    /// Delay between consecutive page fetches, in milliseconds
    ///
    /// Keeps the scrape loop under the store's rate limits. Set to 0
    /// in tests.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lang: default_lang(),
            country: default_country(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout: default_request_timeout(),
        }
    }
}
