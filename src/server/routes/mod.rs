//! HTTP route modules

pub mod classify;
pub mod health;

use actix_web::web;

/// Configure all service routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/classify", web::post().to(classify::classify));
}
