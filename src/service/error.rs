//! Failure taxonomy of the stats service
//!
//! `Display` text is returned to API callers verbatim.

use thiserror::Error;

use crate::retriever::FetchError;

/// Coarse failure class, independent of the exact message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUsername,
    Timeout,
    ServiceUnavailable,
    UpstreamHttpError,
    UserNotFound,
    ExtractionStructureChanged,
    NoDataFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidUsername => "invalid_username",
            ErrorKind::Timeout => "timeout",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::UpstreamHttpError => "upstream_http_error",
            ErrorKind::UserNotFound => "user_not_found",
            ErrorKind::ExtractionStructureChanged => "extraction_structure_changed",
            ErrorKind::NoDataFound => "no_data_found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error("Invalid username: {0} is not a valid GeeksForGeeks username")]
    InvalidUsername(String),

    #[error("Request to GeeksForGeeks timed out. Please try again later.")]
    Timeout,

    #[error("Failed to connect to GeeksForGeeks. The service might be down or your internet connection is unstable.")]
    ServiceUnavailable,

    #[error("GeeksForGeeks API error: {reason}")]
    UpstreamHttp { status: u16, reason: String },

    #[error("User '{0}' not found on GeeksForGeeks")]
    UserNotFound(String),

    #[error("User data not found for '{0}'. The user may not exist or GeeksForGeeks has changed their data format.")]
    UserDataNotFound(String),

    #[error("User profile information not found for '{0}'.")]
    ProfileNotFound(String),

    #[error("Could not extract data for user '{0}'. GeeksForGeeks may have changed their page structure.")]
    StructureChanged(String),

    #[error("Failed to parse user data: Invalid JSON format in GeeksForGeeks response.")]
    InvalidJson,

    #[error("Failed to access required data field: '{0}'. GeeksForGeeks may have changed their data structure.")]
    MissingField(String),

    #[error("No problem solving data found for user '{0}'. The user may not have solved any problems or the GeeksForGeeks profile structure has changed.")]
    NoDataFound(String),
}

impl StatsError {
    /// Map a transport failure for `username`'s page
    pub fn from_fetch(err: FetchError, username: &str) -> Self {
        match err {
            FetchError::Timeout => StatsError::Timeout,
            FetchError::Connect(_) | FetchError::Body(_) => StatsError::ServiceUnavailable,
            FetchError::Status { status: 404, .. } => StatsError::UserNotFound(username.to_string()),
            FetchError::Status { status, reason } => StatsError::UpstreamHttp { status, reason },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::InvalidUsername(_) => ErrorKind::InvalidUsername,
            StatsError::Timeout => ErrorKind::Timeout,
            StatsError::ServiceUnavailable => ErrorKind::ServiceUnavailable,
            StatsError::UpstreamHttp { .. } => ErrorKind::UpstreamHttpError,
            StatsError::UserNotFound(_)
            | StatsError::UserDataNotFound(_)
            | StatsError::ProfileNotFound(_) => ErrorKind::UserNotFound,
            StatsError::StructureChanged(_)
            | StatsError::InvalidJson
            | StatsError::MissingField(_) => ErrorKind::ExtractionStructureChanged,
            StatsError::NoDataFound(_) => ErrorKind::NoDataFound,
        }
    }

    /// HTTP status the failure is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            StatsError::InvalidUsername(_) => 400,
            StatsError::Timeout => 504,
            StatsError::ServiceUnavailable => 503,
            StatsError::UpstreamHttp { status, .. } => *status,
            StatsError::UserNotFound(_)
            | StatsError::UserDataNotFound(_)
            | StatsError::ProfileNotFound(_)
            | StatsError::NoDataFound(_) => 404,
            StatsError::StructureChanged(_)
            | StatsError::InvalidJson
            | StatsError::MissingField(_) => 422,
        }
    }

    /// The "not found" signal that sends the aggregator to the legacy path quietly
    pub fn is_not_found(&self) -> bool {
        self.status_code() == 404
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_mapping() {
        let not_found = StatsError::from_fetch(
            FetchError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            },
            "alice",
        );
        assert_eq!(not_found.to_string(), "User 'alice' not found on GeeksForGeeks");
        assert_eq!(not_found.kind(), ErrorKind::UserNotFound);

        let upstream = StatsError::from_fetch(
            FetchError::Status {
                status: 502,
                reason: "Bad Gateway".to_string(),
            },
            "alice",
        );
        assert_eq!(upstream.to_string(), "GeeksForGeeks API error: Bad Gateway");
        assert_eq!(upstream.status_code(), 502);
        assert_eq!(upstream.kind(), ErrorKind::UpstreamHttpError);
    }

    #[test]
    fn test_timeout_and_connect_are_distinct() {
        let timeout = StatsError::from_fetch(FetchError::Timeout, "alice");
        let connect = StatsError::from_fetch(FetchError::Connect("refused".into()), "alice");

        assert_eq!(timeout.kind(), ErrorKind::Timeout);
        assert_eq!(timeout.status_code(), 504);
        assert_eq!(connect.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(connect.status_code(), 503);
    }

    #[test]
    fn test_body_read_failure_is_unavailable() {
        let err = StatsError::from_fetch(FetchError::Body("connection reset".into()), "alice");
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_not_found_signal() {
        assert!(StatsError::ProfileNotFound("a".into()).is_not_found());
        assert!(StatsError::UserDataNotFound("a".into()).is_not_found());
        assert!(!StatsError::StructureChanged("a".into()).is_not_found());
        assert!(!StatsError::InvalidJson.is_not_found());
    }
}
