//! Application state and service initialization

use std::sync::Arc;

use crate::model::Config;
use crate::retriever::{HttpPageFetcher, SiteUrls};
use crate::service::StatsService;

/// Application state containing all services
///
/// Nothing here is mutable after construction; every request works on its
/// own fetched pages.
pub struct AppState {
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    /// Build the HTTP fetcher and stats service from configuration
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let urls = SiteUrls::from_config(&config.fetch)
            .map_err(|e| AppError::InvalidConfig(format!("invalid base URL: {e}")))?;

        let fetcher = HttpPageFetcher::new(&config.fetch)
            .map_err(|e| AppError::InvalidConfig(format!("HTTP client: {e}")))?;

        tracing::info!(
            timeout_secs = config.fetch.timeout().as_secs_f64(),
            profile_base = %config.fetch.profile_base_url,
            practice_base = %config.fetch.practice_base_url,
            "Stats service configured"
        );

        Ok(Self {
            stats_service: Arc::new(StatsService::new(Arc::new(fetcher), urls)),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
