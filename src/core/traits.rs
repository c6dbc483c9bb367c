//! Adapter traits for the resolver's collaborators
//!
//! The resolver only sees these two seams, so both the catalog store
//! and the Play Store client can be swapped for test doubles.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::record::{AppRecord, ScrapedApp};
use crate::utils::error::Result;

/// Persistent catalog of app records, keyed by package name.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the records for the given package names in one query.
    ///
    /// Names without a row are simply absent from the map. An empty
    /// input must return an empty map without touching the store.
    /// Any store failure is a single aggregate error, never a
    /// silently partial result.
    async fn batch_get(&self, package_names: &[String]) -> Result<HashMap<String, AppRecord>>;

    /// Insert or update a record, keyed by its package name.
    ///
    /// Required fields overwrite; optional fields that are `None` on
    /// the incoming record keep whatever the store already holds, so
    /// a scraper write cannot erase an imported localized category.
    async fn upsert(&self, record: &AppRecord) -> Result<()>;
}

/// External source of app metadata.
#[async_trait]
pub trait AppInfoSource: Send + Sync {
    /// Look up metadata for the given package names.
    ///
    /// Returns one entry per name that resolved; names that fail are
    /// logged and omitted rather than failing the batch. `Err` is
    /// reserved for failures that abort the whole call.
    async fn fetch(&self, package_names: &[String]) -> Result<Vec<ScrapedApp>>;
}
