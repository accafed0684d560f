//! HTTP surface over [`StatsService`](crate::service::StatsService)

pub mod error;
pub mod health;
pub mod stats;

use actix_web::web;

pub use error::{ApiError, Endpoint, ErrorResponse};

/// Register all routes. Fixed paths go first so `/{username}` cannot shadow them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).configure(stats::configure);
}
