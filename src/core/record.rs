//! Domain records for the app catalog

use serde::{Deserialize, Serialize};

/// A catalog entry for a single application, keyed by package name.
///
/// `category` holds the Play Store taxonomy code (e.g. `GAME`,
/// `PRODUCTIVITY`); `category_ko` the localized label. Both are
/// optional because the catalog may hold partially imported rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Package name, the unique key (e.g. `com.example.app`)
    pub package_name: String,
    /// Display name
    pub app_name: String,
    /// Store description
    pub description: String,
    /// Store category code
    pub category: Option<String>,
    /// Localized category label
    pub category_ko: Option<String>,
}

impl AppRecord {
    /// Whether this record can be served as a cache hit.
    ///
    /// A row without a category is treated as incomplete: it exists
    /// in the catalog but still needs a scrape to be useful.
    pub fn is_complete(&self) -> bool {
        self.category.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// App metadata as returned by the Play Store scraper.
///
/// The store page never supplies a localized category, so there is no
/// `category_ko` here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedApp {
    /// Package name the page was fetched for
    pub package_name: String,
    /// Display name (falls back to the package name)
    pub app_name: String,
    /// Store description, possibly empty
    pub description: String,
    /// Store category code, absent when the page carries none
    pub category: Option<String>,
}

impl ScrapedApp {
    /// Convert into a catalog record, when a category is present.
    ///
    /// Returns `None` for category-less scrapes: those must not be
    /// persisted as complete records.
    pub fn into_record(self) -> Option<AppRecord> {
        let category = self.category.filter(|c| !c.is_empty())?;
        Some(AppRecord {
            package_name: self.package_name,
            app_name: self.app_name,
            description: self.description,
            category: Some(category),
            category_ko: None,
        })
    }
}
