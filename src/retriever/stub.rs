//! In-memory fetcher for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use super::{FetchError, PageFetcher};

/// Serves canned responses by exact URL and records every request.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<String, FetchError>>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.responses.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub fn with_error(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());

        match self.responses.get(url.as_str()) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}
