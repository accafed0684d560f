//! REST API endpoints for user statistics and profiles

use actix_web::{HttpResponse, get, web};

use super::error::{ApiError, Endpoint};
use crate::service::StatsService;

/// Problem counts per difficulty tier
#[get("/{username}")]
pub async fn user_stats(
    service: web::Data<StatsService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let record = service
        .get_user_stats(&username)
        .await
        .map_err(ApiError::at(Endpoint::Stats))?;

    Ok(HttpResponse::Ok().json(record))
}

/// Problem counts with the share of each tier
#[get("/{username}/report")]
pub async fn stats_report(
    service: web::Data<StatsService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let report = service
        .get_stats_report(&username)
        .await
        .map_err(ApiError::at(Endpoint::Report))?;

    Ok(HttpResponse::Ok().json(report))
}

#[get("/{username}/profile")]
pub async fn user_profile(
    service: web::Data<StatsService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let info = service
        .get_profile(&username)
        .await
        .map_err(ApiError::at(Endpoint::Profile))?;

    Ok(HttpResponse::Ok().json(info))
}

#[get("/{username}/solved-problems")]
pub async fn solved_problems(
    service: web::Data<StatsService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let username = path.into_inner();
    let solved = service
        .get_solved_problems(&username)
        .await
        .map_err(ApiError::at(Endpoint::SolvedProblems))?;

    Ok(HttpResponse::Ok().json(solved))
}

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_stats)
        .service(stats_report)
        .service(user_profile)
        .service(solved_problems);
}
