//! Category resolution pipeline
//!
//! Resolves a batch of package names against the catalog first and
//! the Play Store second: one batch lookup, partition into hits and
//! misses, scrape the misses, persist what the scrape learned, then
//! reassemble the results in the original request order. Failures are
//! isolated per item; only a failed batch lookup takes the whole
//! request down, and even that is reported item by item.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::record::{AppRecord, ScrapedApp};
use crate::core::traits::{AppInfoSource, CatalogStore};

/// Outcome for a single requested package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Complete record served from the catalog
    Cached(AppRecord),
    /// Record resolved by the scraper during this request
    Fetched(AppRecord),
    /// No usable result for this package name
    Failed(LookupFailure),
}

/// Details of a failed lookup.
///
/// `app_name` and `description` are carried when the store page was
/// found but lacked a category, so callers still see the partial data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    /// Package name the failure applies to
    pub package_name: String,
    /// Display name, when the page resolved without a category
    pub app_name: Option<String>,
    /// Description, when the page resolved without a category
    pub description: Option<String>,
    /// Human-readable reason
    pub reason: String,
}

impl Resolution {
    /// The package name this resolution belongs to.
    pub fn package_name(&self) -> &str {
        match self {
            Resolution::Cached(record) | Resolution::Fetched(record) => &record.package_name,
            Resolution::Failed(failure) => &failure.package_name,
        }
    }

    fn failed(package_name: &str, reason: String) -> Self {
        Resolution::Failed(LookupFailure {
            package_name: package_name.to_string(),
            app_name: None,
            description: None,
            reason,
        })
    }
}

/// Resolves package names to categorized app records.
///
/// Collaborators are injected so tests can run against in-memory
/// doubles; the resolver itself keeps no state between calls.
pub struct CategoryResolver {
    store: Arc<dyn CatalogStore>,
    source: Arc<dyn AppInfoSource>,
}

impl CategoryResolver {
    /// Create a resolver over the given catalog and metadata source.
    pub fn new(store: Arc<dyn CatalogStore>, source: Arc<dyn AppInfoSource>) -> Self {
        Self { store, source }
    }

    /// Resolve a batch of package names.
    ///
    /// The output has exactly one entry per input, in input order,
    /// duplicates included. Callers are expected to have filtered out
    /// empty names beforehand.
    pub async fn resolve(&self, package_names: &[String]) -> Vec<Resolution> {
        if package_names.is_empty() {
            return Vec::new();
        }

        // One multi-key read for the whole batch. When it fails there
        // is nothing sensible to partition, so every item reports the
        // lookup error and the scraper is never consulted.
        let cached = match self.store.batch_get(package_names).await {
            Ok(records) => records,
            Err(e) => {
                warn!("catalog batch lookup failed: {}", e);
                let reason = format!("catalog lookup failed: {e}");
                return package_names
                    .iter()
                    .map(|name| Resolution::failed(name, reason.clone()))
                    .collect();
            }
        };
        debug!(
            "catalog returned {} of {} requested records",
            cached.len(),
            package_names.len()
        );

        // A stored row without a category is a miss: it must go back
        // through the scraper until a category materializes.
        let misses: Vec<String> = package_names
            .iter()
            .filter(|name| !cached.get(*name).is_some_and(AppRecord::is_complete))
            .cloned()
            .collect();

        let mut scraped: HashMap<String, ScrapedApp> = HashMap::new();
        let mut fetch_error: Option<String> = None;

        if !misses.is_empty() {
            info!("scraping {} uncached package names", misses.len());
            match self.source.fetch(&misses).await {
                Ok(entries) => {
                    for entry in entries {
                        scraped.insert(entry.package_name.clone(), entry);
                    }
                }
                Err(e) => {
                    warn!("scrape stage failed: {}", e);
                    fetch_error = Some(format!("scrape failed: {e}"));
                }
            }
        }

        // Persist every scrape that produced a category. A failed
        // write is logged and the item still resolves from the
        // scraped data; other items are unaffected.
        for entry in scraped.values() {
            if let Some(record) = entry.clone().into_record() {
                if let Err(e) = self.store.upsert(&record).await {
                    warn!("failed to persist record for {}: {}", record.package_name, e);
                }
            }
        }

        package_names
            .iter()
            .map(|name| {
                if let Some(record) = cached.get(name).filter(|r| r.is_complete()) {
                    return Resolution::Cached(record.clone());
                }
                if let Some(reason) = &fetch_error {
                    return Resolution::failed(name, reason.clone());
                }
                match scraped.get(name) {
                    Some(entry) => match entry.clone().into_record() {
                        Some(record) => Resolution::Fetched(record),
                        None => Resolution::Failed(LookupFailure {
                            package_name: name.clone(),
                            app_name: Some(entry.app_name.clone()),
                            description: Some(entry.description.clone()),
                            reason: format!("category unavailable for {name}"),
                        }),
                    },
                    None => Resolution::failed(name, format!("no information found for {name}")),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, ServiceError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory catalog double recording every upsert.
    #[derive(Default)]
    struct MemoryCatalog {
        records: Mutex<HashMap<String, AppRecord>>,
        upserts: Mutex<Vec<String>>,
        fail_lookup: bool,
        fail_upsert: bool,
    }

    impl MemoryCatalog {
        fn with_records(records: Vec<AppRecord>) -> Self {
            Self {
                records: Mutex::new(
                    records
                        .into_iter()
                        .map(|r| (r.package_name.clone(), r))
                        .collect(),
                ),
                ..Default::default()
            }
        }

        fn upserted(&self) -> Vec<String> {
            self.upserts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogStore for MemoryCatalog {
        async fn batch_get(&self, package_names: &[String]) -> Result<HashMap<String, AppRecord>> {
            if self.fail_lookup {
                return Err(ServiceError::internal("database unreachable"));
            }
            let records = self.records.lock().unwrap();
            Ok(package_names
                .iter()
                .filter_map(|name| records.get(name).map(|r| (name.clone(), r.clone())))
                .collect())
        }

        async fn upsert(&self, record: &AppRecord) -> Result<()> {
            self.upserts.lock().unwrap().push(record.package_name.clone());
            if self.fail_upsert {
                return Err(ServiceError::internal("write refused"));
            }
            self.records
                .lock()
                .unwrap()
                .insert(record.package_name.clone(), record.clone());
            Ok(())
        }
    }

    /// Scripted metadata source recording every fetch call.
    #[derive(Default)]
    struct ScriptedSource {
        apps: Vec<ScrapedApp>,
        calls: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    impl ScriptedSource {
        fn with_apps(apps: Vec<ScrapedApp>) -> Self {
            Self {
                apps,
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AppInfoSource for ScriptedSource {
        async fn fetch(&self, package_names: &[String]) -> Result<Vec<ScrapedApp>> {
            self.calls.lock().unwrap().push(package_names.to_vec());
            if self.fail {
                return Err(ServiceError::scrape("store unreachable"));
            }
            Ok(self
                .apps
                .iter()
                .filter(|a| package_names.contains(&a.package_name))
                .cloned()
                .collect())
        }
    }

    fn cached_record(name: &str, category: &str) -> AppRecord {
        AppRecord {
            package_name: name.to_string(),
            app_name: format!("{name} app"),
            description: "stored".to_string(),
            category: Some(category.to_string()),
            category_ko: Some("게임".to_string()),
        }
    }

    fn scraped_app(name: &str, category: Option<&str>) -> ScrapedApp {
        ScrapedApp {
            package_name: name.to_string(),
            app_name: format!("{name} app"),
            description: "scraped".to_string(),
            category: category.map(String::from),
        }
    }

    fn resolver(
        store: Arc<MemoryCatalog>,
        source: Arc<ScriptedSource>,
    ) -> CategoryResolver {
        CategoryResolver::new(store, source)
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn empty_input_skips_both_adapters() {
        let store = Arc::new(MemoryCatalog::default());
        let source = Arc::new(ScriptedSource::default());
        let results = resolver(store, source.clone()).resolve(&[]).await;
        assert!(results.is_empty());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn cache_hit_never_reaches_the_scraper() {
        let store = Arc::new(MemoryCatalog::with_records(vec![cached_record(
            "com.a", "GAME",
        )]));
        let source = Arc::new(ScriptedSource::default());
        let results = resolver(store, source.clone())
            .resolve(&names(&["com.a"]))
            .await;

        assert_eq!(results.len(), 1);
        match &results[0] {
            Resolution::Cached(record) => {
                assert_eq!(record.category.as_deref(), Some("GAME"));
                assert_eq!(record.category_ko.as_deref(), Some("게임"));
            }
            other => panic!("expected cache hit, got {other:?}"),
        }
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn incomplete_cached_record_is_scraped_again() {
        let mut stale = cached_record("com.a", "GAME");
        stale.category = None;
        let store = Arc::new(MemoryCatalog::with_records(vec![stale]));
        let source = Arc::new(ScriptedSource::with_apps(vec![scraped_app(
            "com.a",
            Some("TOOLS"),
        )]));
        let results = resolver(store.clone(), source.clone())
            .resolve(&names(&["com.a"]))
            .await;

        assert_eq!(source.calls(), vec![names(&["com.a"])]);
        match &results[0] {
            Resolution::Fetched(record) => {
                assert_eq!(record.category.as_deref(), Some("TOOLS"));
                assert_eq!(record.category_ko, None);
            }
            other => panic!("expected scraped result, got {other:?}"),
        }
        assert_eq!(store.upserted(), vec!["com.a".to_string()]);
    }

    #[tokio::test]
    async fn preserves_request_order_including_duplicates() {
        let store = Arc::new(MemoryCatalog::with_records(vec![cached_record(
            "com.b", "SOCIAL",
        )]));
        let source = Arc::new(ScriptedSource::with_apps(vec![scraped_app(
            "com.a",
            Some("GAME"),
        )]));
        let input = names(&["com.a", "com.b", "com.a", "com.missing"]);
        let results = resolver(store, source).resolve(&input).await;

        assert_eq!(results.len(), input.len());
        for (resolution, requested) in results.iter().zip(&input) {
            assert_eq!(resolution.package_name(), requested);
        }
        assert!(matches!(results[0], Resolution::Fetched(_)));
        assert!(matches!(results[1], Resolution::Cached(_)));
        assert!(matches!(results[2], Resolution::Fetched(_)));
        assert!(matches!(results[3], Resolution::Failed(_)));
    }

    #[tokio::test]
    async fn unknown_package_reports_not_found_and_is_not_persisted() {
        let store = Arc::new(MemoryCatalog::default());
        let source = Arc::new(ScriptedSource::default());
        let results = resolver(store.clone(), source)
            .resolve(&names(&["com.c"]))
            .await;

        match &results[0] {
            Resolution::Failed(failure) => {
                assert_eq!(failure.reason, "no information found for com.c");
                assert_eq!(failure.app_name, None);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(store.upserted().is_empty());
    }

    #[tokio::test]
    async fn category_less_page_reports_error_with_partial_fields() {
        let store = Arc::new(MemoryCatalog::default());
        let source = Arc::new(ScriptedSource::with_apps(vec![scraped_app("com.a", None)]));
        let results = resolver(store.clone(), source)
            .resolve(&names(&["com.a"]))
            .await;

        match &results[0] {
            Resolution::Failed(failure) => {
                assert_eq!(failure.reason, "category unavailable for com.a");
                assert_eq!(failure.app_name.as_deref(), Some("com.a app"));
                assert_eq!(failure.description.as_deref(), Some("scraped"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(store.upserted().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_fails_everything_and_skips_the_scraper() {
        let store = Arc::new(MemoryCatalog {
            fail_lookup: true,
            ..Default::default()
        });
        let source = Arc::new(ScriptedSource::default());
        let results = resolver(store, source.clone())
            .resolve(&names(&["com.a", "com.b"]))
            .await;

        assert_eq!(results.len(), 2);
        for resolution in &results {
            match resolution {
                Resolution::Failed(failure) => {
                    assert!(failure.reason.contains("catalog lookup failed"));
                }
                other => panic!("expected failure, got {other:?}"),
            }
        }
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn scrape_failure_spares_cache_hits() {
        let store = Arc::new(MemoryCatalog::with_records(vec![cached_record(
            "com.hit", "GAME",
        )]));
        let source = Arc::new(ScriptedSource {
            fail: true,
            ..Default::default()
        });
        let results = resolver(store, source)
            .resolve(&names(&["com.hit", "com.miss"]))
            .await;

        assert!(matches!(results[0], Resolution::Cached(_)));
        match &results[1] {
            Resolution::Failed(failure) => {
                assert!(failure.reason.contains("scrape failed"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_persist_still_returns_the_scraped_record() {
        let store = Arc::new(MemoryCatalog {
            fail_upsert: true,
            ..Default::default()
        });
        let source = Arc::new(ScriptedSource::with_apps(vec![scraped_app(
            "com.a",
            Some("GAME"),
        )]));
        let results = resolver(store.clone(), source)
            .resolve(&names(&["com.a"]))
            .await;

        assert!(matches!(&results[0], Resolution::Fetched(r) if r.category.as_deref() == Some("GAME")));
        assert_eq!(store.upserted(), vec!["com.a".to_string()]);
    }

    #[tokio::test]
    async fn mixed_batch_matches_the_expected_outcomes() {
        // Stored hit, scraped miss, and a name the store knows nothing
        // about: each resolves independently.
        let store = Arc::new(MemoryCatalog::with_records(vec![cached_record(
            "com.a", "GAME",
        )]));
        let source = Arc::new(ScriptedSource::with_apps(vec![scraped_app(
            "com.b",
            Some("TOOLS"),
        )]));
        let results = resolver(store.clone(), source.clone())
            .resolve(&names(&["com.a", "com.b", "com.c"]))
            .await;

        assert!(matches!(&results[0], Resolution::Cached(r) if r.category.as_deref() == Some("GAME")));
        assert!(matches!(&results[1], Resolution::Fetched(r) if r.category.as_deref() == Some("TOOLS")));
        assert!(matches!(&results[2], Resolution::Failed(f) if f.reason == "no information found for com.c"));

        // Only the scraped hit was persisted, and the scraper only saw
        // the misses.
        assert_eq!(store.upserted(), vec!["com.b".to_string()]);
        assert_eq!(source.calls(), vec![names(&["com.b", "com.c"])]);
    }
}
