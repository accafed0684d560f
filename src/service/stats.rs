//! User statistics service
//!
//! Fetches the practice page first and falls back to the legacy profile
//! page when the structured path fails. The two paths are never merged.

use std::sync::Arc;

use url::Url;

use crate::extract::{legacy, structured};
use crate::model::{DetailedProfile, ProfileInfo, SolvedProblems, StatsReport, UserStatsRecord};
use crate::retriever::{PageFetcher, SiteUrls};
use crate::service::normalize;
use crate::service::StatsError;

/// Names that reach the user routes but are never profiles
const RESERVED_NAMES: &[&str] = &["favicon.ico", "robots.txt", "sitemap.xml", "index.html"];

/// Reject usernames that cannot name a profile, before any request is made
pub fn validate_username(username: &str) -> Result<(), StatsError> {
    let invalid = username.trim().is_empty()
        || username == "."
        || username == ".."
        || RESERVED_NAMES
            .iter()
            .any(|name| name.eq_ignore_ascii_case(username))
        || username
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '\\' | '?' | '#' | ':'));

    if invalid {
        return Err(StatsError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

pub struct StatsService {
    fetcher: Arc<dyn PageFetcher>,
    urls: SiteUrls,
}

impl StatsService {
    pub fn new(fetcher: Arc<dyn PageFetcher>, urls: SiteUrls) -> Self {
        Self { fetcher, urls }
    }

    /// Canonical per-difficulty counts for a user
    pub async fn get_user_stats(&self, username: &str) -> Result<UserStatsRecord, StatsError> {
        validate_username(username)?;

        match self.fetch_profile(username).await {
            Ok(profile) => Ok(normalize::from_profile(username, &profile)),
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(username = %username, error = %e, "Structured profile not found, trying legacy page");
                } else {
                    tracing::warn!(
                        username = %username,
                        kind = e.kind().as_str(),
                        error = %e,
                        "Structured profile fetch failed, falling back to legacy extractor"
                    );
                }
                self.legacy_stats(username).await
            }
        }
    }

    /// Stats record with per-tier percentages
    pub async fn get_stats_report(&self, username: &str) -> Result<StatsReport, StatsError> {
        let record = self.get_user_stats(username).await?;
        Ok(normalize::report(record))
    }

    /// Profile info and solved problems from the structured path only
    pub async fn get_detailed_profile(
        &self,
        username: &str,
    ) -> Result<DetailedProfile, StatsError> {
        validate_username(username)?;
        self.fetch_profile(username).await
    }

    pub async fn get_profile(&self, username: &str) -> Result<ProfileInfo, StatsError> {
        Ok(self.get_detailed_profile(username).await?.info)
    }

    pub async fn get_solved_problems(&self, username: &str) -> Result<SolvedProblems, StatsError> {
        let profile = self.get_detailed_profile(username).await?;
        Ok(normalize::solved_problems(username, &profile))
    }

    async fn fetch_profile(&self, username: &str) -> Result<DetailedProfile, StatsError> {
        let url = self.page_url(username, SiteUrls::practice_page)?;
        let body = self.fetch_body(&url, username).await?;
        structured::extract_profile(&body, username, &self.urls)
    }

    async fn legacy_stats(&self, username: &str) -> Result<UserStatsRecord, StatsError> {
        let url = self.page_url(username, SiteUrls::profile_page)?;
        let body = self.fetch_body(&url, username).await?;
        let tally = legacy::extract_counts(&body, username)?;
        Ok(normalize::from_tally(username, &tally))
    }

    fn page_url(
        &self,
        username: &str,
        build: fn(&SiteUrls, &str) -> Result<Url, url::ParseError>,
    ) -> Result<Url, StatsError> {
        build(&self.urls, username).map_err(|e| {
            tracing::debug!(username = %username, error = %e, "Username does not form a valid URL");
            StatsError::InvalidUsername(username.to_string())
        })
    }

    async fn fetch_body(&self, url: &Url, username: &str) -> Result<String, StatsError> {
        self.fetcher
            .fetch(url)
            .await
            .map_err(|e| {
                tracing::debug!(url = %url, error = %e, "Page fetch failed");
                StatsError::from_fetch(e, username)
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{DifficultyTag, FetchConfig};
    use crate::retriever::stub::StubFetcher;
    use crate::retriever::FetchError;
    use crate::service::ErrorKind;

    const PRACTICE: &str = "https://auth.geeksforgeeks.org/user/alice/practice/";
    const PROFILE: &str = "https://www.geeksforgeeks.org/user/alice/";

    fn service(fetcher: StubFetcher) -> (StatsService, Arc<StubFetcher>) {
        let fetcher = Arc::new(fetcher);
        let urls = SiteUrls::from_config(&FetchConfig::default()).unwrap();
        (StatsService::new(fetcher.clone(), urls), fetcher)
    }

    fn practice_page() -> String {
        let payload = json!({
            "props": { "pageProps": {
                "userInfo": { "name": "Alice", "total_problems_solved": 3, "institute_rank": 9 },
                "userSubmissionsInfo": {
                    "Basic": { "1": { "pname": "Sum", "slug": "sum" } },
                    "Medium": {
                        "2": { "pname": "LRU", "slug": "lru" },
                        "3": { "pname": "Trie", "slug": "trie" }
                    }
                }
            } }
        });
        format!(r#"<script id="__NEXT_DATA__" type="application/json">{payload}</script>"#)
    }

    fn legacy_page() -> String {
        r#"<div class="problemNavbar_head__cKSRi">SCHOOL (20)BASIC (35)EASY (50)MEDIUM (30)HARD (15)</div>"#
            .to_string()
    }

    #[tokio::test]
    async fn test_structured_path_is_authoritative() {
        let (svc, fetcher) = service(
            StubFetcher::new()
                .with_page(PRACTICE, practice_page())
                .with_page(PROFILE, legacy_page()),
        );

        let record = svc.get_user_stats("alice").await.unwrap();

        assert_eq!(record.user_name, "alice");
        assert_eq!(record.counts.basic, 1);
        assert_eq!(record.counts.medium, 2);
        assert_eq!(record.counts.school, 0);
        assert_eq!(record.total_problems_solved, 3);
        assert_eq!(fetcher.requested(), vec![PRACTICE.to_string()]);
    }

    #[tokio::test]
    async fn test_not_found_falls_back_to_legacy() {
        let (svc, fetcher) = service(StubFetcher::new().with_page(PROFILE, legacy_page()));

        let record = svc.get_user_stats("alice").await.unwrap();

        let counts: Vec<u64> = DifficultyTag::ALL.iter().map(|t| record.counts.get(*t)).collect();
        assert_eq!(counts, vec![20, 35, 50, 30, 15]);
        assert_eq!(record.total_problems_solved, 150);
        assert_eq!(
            fetcher.requested(),
            vec![PRACTICE.to_string(), PROFILE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_structure_change_still_falls_back() {
        let (svc, _) = service(
            StubFetcher::new()
                .with_page(PRACTICE, "<html><body>redesigned</body></html>")
                .with_page(PROFILE, legacy_page()),
        );

        let record = svc.get_user_stats("alice").await.unwrap();
        assert_eq!(record.total_problems_solved, 150);
    }

    #[tokio::test]
    async fn test_upstream_error_then_legacy_failure_reports_legacy_error() {
        let (svc, _) = service(
            StubFetcher::new()
                .with_error(
                    PRACTICE,
                    FetchError::Status {
                        status: 500,
                        reason: "Internal Server Error".to_string(),
                    },
                )
                .with_page(PROFILE, "<html><body>empty</body></html>"),
        );

        let err = svc.get_user_stats("alice").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoDataFound);
        assert_eq!(
            err.to_string(),
            "No problem solving data found for user 'alice'. The user may not have solved any problems or the GeeksForGeeks profile structure has changed."
        );
    }

    #[tokio::test]
    async fn test_both_paths_not_found() {
        let (svc, fetcher) = service(StubFetcher::new());

        let err = svc.get_user_stats("alice").await.unwrap_err();
        assert_eq!(err.to_string(), "User 'alice' not found on GeeksForGeeks");
        assert_eq!(err.status_code(), 404);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_timeouts_surface_as_timeout() {
        let (svc, _) = service(
            StubFetcher::new()
                .with_error(PRACTICE, FetchError::Timeout)
                .with_error(PROFILE, FetchError::Timeout),
        );

        let err = svc.get_user_stats("alice").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(
            err.to_string(),
            "Request to GeeksForGeeks timed out. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_connect_failure_on_legacy_path() {
        let (svc, _) = service(
            StubFetcher::new().with_error(PROFILE, FetchError::Connect("refused".to_string())),
        );

        let err = svc.get_user_stats("alice").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.status_code(), 503);
    }

    #[tokio::test]
    async fn test_invalid_username_makes_no_request() {
        let (svc, fetcher) = service(StubFetcher::new());

        let err = svc.get_user_stats("favicon.ico").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUsername);
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "Invalid username: favicon.ico is not a valid GeeksForGeeks username"
        );

        let err = svc.get_detailed_profile("a/b").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUsername);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let (svc, _) = service(StubFetcher::new().with_page(PROFILE, legacy_page()));

        let first = serde_json::to_string(&svc.get_user_stats("alice").await.unwrap()).unwrap();
        let second = serde_json::to_string(&svc.get_user_stats("alice").await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_detailed_profile_does_not_fall_back() {
        let (svc, fetcher) = service(StubFetcher::new().with_page(PROFILE, legacy_page()));

        let err = svc.get_profile("alice").await.unwrap_err();
        assert_eq!(err.to_string(), "User 'alice' not found on GeeksForGeeks");
        assert_eq!(fetcher.requested(), vec![PRACTICE.to_string()]);
    }

    #[tokio::test]
    async fn test_profile_and_solved_problems() {
        let (svc, _) = service(StubFetcher::new().with_page(PRACTICE, practice_page()));

        let info = svc.get_profile("alice").await.unwrap();
        assert_eq!(info.full_name, "Alice");
        assert_eq!(info.institute_rank, "9");
        assert_eq!(info.max_streak, "00");

        let solved = svc.get_solved_problems("alice").await.unwrap();
        assert_eq!(solved.total_problems_solved, 3);
        assert_eq!(solved.problems_by_difficulty["medium"], 2);
        assert_eq!(
            solved.problems[0].url,
            "https://practice.geeksforgeeks.org/problems/sum"
        );
    }

    #[tokio::test]
    async fn test_stats_report() {
        let (svc, _) = service(StubFetcher::new().with_page(PRACTICE, practice_page()));

        let report = svc.get_stats_report("alice").await.unwrap();
        assert_eq!(report.percentages.basic, 33.33);
        assert_eq!(report.percentages.medium, 66.67);
        assert_eq!(report.percentages.hard, 0.0);
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("alice.bob").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("..").is_err());
        assert!(validate_username("ROBOTS.TXT").is_err());
        assert!(validate_username("a b").is_err());
        assert!(validate_username("mailto:x").is_err());
    }
}
