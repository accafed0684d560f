//! Health check endpoint for liveness probes

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running. The upstream site is
/// not contacted.
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Answered here so `/{username}` never sees it
#[get("/favicon.ico")]
pub async fn favicon() -> impl Responder {
    HttpResponse::NoContent().finish()
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(favicon);
}
