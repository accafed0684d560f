//! Page retrieval from the upstream profile site

mod http;
#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use url::Url;

use crate::model::FetchConfig;

pub use http::HttpPageFetcher;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The response headers arrived but the body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Capability to GET a page and return the body of a 2xx response.
/// Non-2xx responses are returned as [`FetchError::Status`]; implementations
/// never retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Upstream URL templates
#[derive(Debug, Clone)]
pub struct SiteUrls {
    profile_base: Url,
    practice_base: Url,
    problem_base: String,
}

impl SiteUrls {
    pub fn from_config(config: &FetchConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            profile_base: with_trailing_slash(&config.profile_base_url)?,
            practice_base: with_trailing_slash(&config.practice_base_url)?,
            problem_base: config.problem_base_url.clone(),
        })
    }

    /// Legacy profile page, e.g. `https://www.geeksforgeeks.org/user/alice/`
    pub fn profile_page(&self, username: &str) -> Result<Url, url::ParseError> {
        self.profile_base.join(&format!("{username}/"))
    }

    /// Practice page embedding the JSON payload
    pub fn practice_page(&self, username: &str) -> Result<Url, url::ParseError> {
        self.practice_base.join(&format!("{username}/practice/"))
    }

    pub fn problem(&self, slug: &str) -> String {
        format!("{}{}", self.problem_base, slug)
    }
}

/// `Url::join` replaces the last segment unless the base ends with `/`
fn with_trailing_slash(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_urls() {
        let urls = SiteUrls::from_config(&FetchConfig::default()).unwrap();
        assert_eq!(
            urls.profile_page("alice").unwrap().as_str(),
            "https://www.geeksforgeeks.org/user/alice/"
        );
        assert_eq!(
            urls.practice_page("alice").unwrap().as_str(),
            "https://auth.geeksforgeeks.org/user/alice/practice/"
        );
        assert_eq!(
            urls.problem("two-sum"),
            "https://practice.geeksforgeeks.org/problems/two-sum"
        );
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let config = FetchConfig {
            profile_base_url: "http://localhost:9000/u".to_string(),
            ..Default::default()
        };
        let urls = SiteUrls::from_config(&config).unwrap();
        assert_eq!(
            urls.profile_page("bob").unwrap().as_str(),
            "http://localhost:9000/u/bob/"
        );
    }

    #[test]
    fn test_invalid_base_rejected() {
        let config = FetchConfig {
            practice_base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(SiteUrls::from_config(&config).is_err());
    }
}
