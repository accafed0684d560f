//! Unified API error handling
//!
//! Every endpoint reports failures with the same JSON body, carrying the
//! service error message unchanged.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::service::StatsError;

/// Standard error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `true`
    pub error: bool,
    /// Human-readable error message
    pub message: String,
    pub status_code: u16,
    /// Endpoint label, e.g. `stats` or `profile`
    pub endpoint: String,
}

/// Endpoint that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Stats,
    Report,
    Profile,
    SolvedProblems,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Stats => "stats",
            Endpoint::Report => "report",
            Endpoint::Profile => "profile",
            Endpoint::SolvedProblems => "solved-problems",
        }
    }
}

/// Service failure tagged with the endpoint that hit it
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct ApiError {
    pub endpoint: Endpoint,
    #[source]
    pub source: StatsError,
}

impl ApiError {
    pub fn new(endpoint: Endpoint, source: StatsError) -> Self {
        Self { endpoint, source }
    }

    /// Adapter for `map_err`
    pub fn at(endpoint: Endpoint) -> impl Fn(StatsError) -> Self {
        move |source| Self::new(endpoint, source)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.source.status_code()).unwrap_or(StatusCode::BAD_GATEWAY)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                endpoint = self.endpoint.as_str(),
                kind = self.source.kind().as_str(),
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::info!(
                endpoint = self.endpoint.as_str(),
                kind = self.source.kind().as_str(),
                status = status.as_u16(),
                message = %self,
                "API request failed"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: true,
            message: self.to_string(),
            status_code: status.as_u16(),
            endpoint: self.endpoint.as_str().to_string(),
        })
    }
}
