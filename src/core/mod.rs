//! Core domain logic
//!
//! Domain records, the adapter traits the engine depends on, and the
//! cache-then-scrape category resolver itself.

pub mod record;
pub mod resolver;
pub mod traits;

pub use record::{AppRecord, ScrapedApp};
pub use resolver::{CategoryResolver, LookupFailure, Resolution};
pub use traits::{AppInfoSource, CatalogStore};
