//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::core::resolver::CategoryResolver;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so the state clones cheaply into
/// each worker.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Category resolution pipeline
    pub resolver: Arc<CategoryResolver>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, resolver: CategoryResolver) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        }
    }
}
