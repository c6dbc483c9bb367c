//! Play Store scraper
//!
//! Fetches store details pages one package at a time, with a fixed
//! inter-request delay to stay under the store's rate limits. A page
//! that fails to fetch or parse is logged and skipped; the batch
//! carries on.

pub mod parse;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::core::record::ScrapedApp;
use crate::core::traits::AppInfoSource;
use crate::utils::error::{Result, ServiceError};

const USER_AGENT: &str = concat!("playcat/", env!("CARGO_PKG_VERSION"));

/// HTTP client for Play Store details pages
#[derive(Debug, Clone)]
pub struct PlayStoreScraper {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl PlayStoreScraper {
    /// Build a scraper for the configured store frontend and locale
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch and parse the details page for a single package
    async fn fetch_one(&self, package_name: &str) -> Result<ScrapedApp> {
        let url = format!(
            "{}/store/apps/details",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("id", package_name),
                ("hl", self.config.lang.as_str()),
                ("gl", self.config.country.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::scrape(format!(
                "store returned {status} for {package_name}"
            )));
        }

        let body = response.text().await?;
        parse::parse_details_page(&body, package_name)
    }
}

#[async_trait]
impl AppInfoSource for PlayStoreScraper {
    async fn fetch(&self, package_names: &[String]) -> Result<Vec<ScrapedApp>> {
        let delay = Duration::from_millis(self.config.request_delay_ms);
        let mut results = Vec::new();

        for (index, package_name) in package_names.iter().enumerate() {
            if package_name.is_empty() {
                continue;
            }
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            match self.fetch_one(package_name).await {
                Ok(app) => {
                    debug!("Collected store page for '{}'", package_name);
                    results.push(app);
                }
                Err(e) => {
                    warn!("Failed to collect '{}': {}", package_name, e);
                }
            }
        }

        info!(
            "Collected {} of {} requested store pages",
            results.len(),
            package_names.len()
        );
        Ok(results)
    }
}
