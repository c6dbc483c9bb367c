//! Store page metadata extraction
//!
//! Play details pages embed a JSON-LD block describing the app. That
//! block is the one structured, stable piece of the page, so it is
//! sliced out with a plain string scan and handed to serde_json.

use serde_json::Value;

use crate::core::record::ScrapedApp;
use crate::utils::error::{Result, ServiceError};

/// Parse a store details page into app metadata.
///
/// `applicationCategory` is optional on the page; its absence is
/// preserved so callers can distinguish "found but uncategorized"
/// from "not found".
pub fn parse_details_page(html: &str, package_name: &str) -> Result<ScrapedApp> {
    let raw = extract_ld_json(html).ok_or_else(|| {
        ServiceError::scrape(format!("no app metadata block found for {package_name}"))
    })?;

    let doc: Value = serde_json::from_str(raw).map_err(|e| {
        ServiceError::scrape(format!("malformed metadata block for {package_name}: {e}"))
    })?;

    let app_name = doc
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(package_name)
        .to_string();
    let description = doc
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let category = doc
        .get("applicationCategory")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(String::from);

    Ok(ScrapedApp {
        package_name: package_name.to_string(),
        app_name,
        description,
        category,
    })
}

/// Slice the first `application/ld+json` script body out of the page.
fn extract_ld_json(html: &str) -> Option<&str> {
    let marker = html.find("application/ld+json")?;
    let rest = &html[marker..];
    let open = rest.find('>')? + 1;
    let close = rest.find("</script>")?;
    if open >= close {
        return None;
    }
    let body = rest[open..close].trim();
    (!body.is_empty()).then_some(body)
}
