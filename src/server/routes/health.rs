//! Health check endpoint

use actix_web::HttpResponse;
use serde_json::json;

/// Basic health check endpoint
///
/// Returns a fixed ok status for load balancers and liveness probes.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
