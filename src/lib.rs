//! # playcat
//!
//! App category lookup service: resolves Android package names to
//! Play Store categories, serving from a local catalog database and
//! falling back to scraping the store's details pages for anything
//! the catalog does not know yet. Newly scraped records are persisted
//! so the next lookup is a cache hit.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use playcat::config::Config;
//! use playcat::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> playcat::Result<()> {
//!     let config = Config::from_file("config/playcat.yaml").await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await
//! }
//! ```
//!
//! The service exposes two endpoints: `POST /classify` takes a batch
//! of `{"package_name": ...}` objects and returns one result per
//! item in request order, and `GET /health` reports liveness.

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod scraper;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::resolver::{CategoryResolver, Resolution};
pub use crate::utils::error::{Result, ServiceError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
