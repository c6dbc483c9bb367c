//! Batch classification endpoint
//!
//! The transport-facing façade over the resolver: validates the
//! request envelope, turns per-item validation failures into in-place
//! error results, and zips resolver output back into request order.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::core::resolver::Resolution;
use crate::server::state::AppState;

/// One requested app
#[derive(Debug, Deserialize)]
pub struct AppQuery {
    /// Package name to classify
    #[serde(default)]
    pub package_name: Option<String>,
}

/// Inbound batch request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Apps to classify
    #[serde(default)]
    pub apps: Vec<AppQuery>,
}

/// Provenance of a single result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Served from the catalog
    Cache,
    /// Resolved by the store scraper during this request
    Scraper,
    /// No usable result
    Error,
}

/// One result per requested app, in request order
#[derive(Debug, Serialize)]
pub struct AppResult {
    /// Package name as requested
    pub package_name: String,
    /// Display name
    pub app_name: Option<String>,
    /// Store description
    pub description: Option<String>,
    /// Store category code
    pub category: Option<String>,
    /// Localized category label
    pub category_ko: Option<String>,
    /// Where the result came from
    pub source: ResultSource,
    /// Failure reason, only present on error results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outbound batch response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// Per-app results
    pub results: Vec<AppResult>,
}

impl AppResult {
    fn from_resolution(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Cached(record) => Self {
                package_name: record.package_name,
                app_name: Some(record.app_name),
                description: Some(record.description),
                category: record.category,
                category_ko: record.category_ko,
                source: ResultSource::Cache,
                error: None,
            },
            Resolution::Fetched(record) => Self {
                package_name: record.package_name,
                app_name: Some(record.app_name),
                description: Some(record.description),
                category: record.category,
                category_ko: record.category_ko,
                source: ResultSource::Scraper,
                error: None,
            },
            Resolution::Failed(failure) => Self {
                package_name: failure.package_name,
                app_name: failure.app_name,
                description: failure.description,
                category: None,
                category_ko: None,
                source: ResultSource::Error,
                error: Some(failure.reason),
            },
        }
    }

    fn error(package_name: String, message: &str) -> Self {
        Self {
            package_name,
            app_name: None,
            description: None,
            category: None,
            category_ko: None,
            source: ResultSource::Error,
            error: Some(message.to_string()),
        }
    }
}

/// Batch category lookup
///
/// Accepts `{"apps": [{"package_name": "..."}]}` and returns one
/// result per requested app, preserving request order. Items that
/// fail validation stay in place as error entries; only a missing or
/// empty `apps` array fails the whole call.
pub async fn classify(
    state: web::Data<AppState>,
    request: web::Json<ClassifyRequest>,
) -> HttpResponse {
    let apps = request.into_inner().apps;

    if apps.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Request must contain 'apps' field with a non-empty array."
        }));
    }

    info!("Classifying batch of {} apps", apps.len());

    let package_names: Vec<String> = apps
        .iter()
        .filter_map(|app| app.package_name.clone().filter(|name| !name.is_empty()))
        .collect();

    let mut resolved = state.resolver.resolve(&package_names).await.into_iter();

    let results: Vec<AppResult> = apps
        .into_iter()
        .map(|app| {
            let package_name = app.package_name.unwrap_or_default();
            if package_name.is_empty() {
                return AppResult::error(package_name, "'package_name' field is required.");
            }
            match resolved.next() {
                Some(resolution) => AppResult::from_resolution(resolution),
                // The resolver yields one entry per valid name, so
                // this arm never runs; it exists as a safeguard.
                None => AppResult::error(package_name, "unexpected error: result not found"),
            }
        })
        .collect();

    HttpResponse::Ok().json(ClassifyResponse { results })
}
