use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database unreachable: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Recipe provider error: {0}")]
    Upstream(String),

    #[error("Recipe provider returned HTTP {0}")]
    UpstreamUnavailable(u16),

    #[error("Recipe provider timed out after {0}s")]
    UpstreamTimeout(u64),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify a driver error raised while reaching the database.
    /// Transport and pool failures mean the store is unreachable; anything
    /// else is an ordinary statement failure.
    pub fn from_connect(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => Error::Connectivity(err),
            other => Error::Database(other),
        }
    }

    /// Whether repeating the same call later could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::UpstreamTimeout(_) => true,
            Error::UpstreamUnavailable(status) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // Database errors might contain sensitive schema information
            Error::Connectivity(_) => "Database unreachable".to_string(),
            Error::Database(_) => "Database operation failed".to_string(),

            // Provider URLs carry the application key in the query string
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Upstream(msg) => format!("Recipe provider error: {msg}"),
            Error::UpstreamUnavailable(status) => {
                format!("Recipe provider returned HTTP {status}")
            }
            Error::UpstreamTimeout(secs) => format!("Recipe provider timed out after {secs}s"),
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {}", self.log_safe());

        let (status, error_message) = match &self {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Connectivity(_) | Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            Error::Http(_)
            | Error::Upstream(_)
            | Error::UpstreamUnavailable(_)
            | Error::UpstreamTimeout(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch recipes from provider".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::UpstreamTimeout(10).is_retryable());
        assert!(Error::UpstreamUnavailable(503).is_retryable());
        assert!(Error::UpstreamUnavailable(429).is_retryable());
        assert!(!Error::UpstreamUnavailable(401).is_retryable());
        assert!(!Error::NotFound("Recipe 1 not found".to_string()).is_retryable());
    }

    #[test]
    fn test_log_safe_redacts_secrets() {
        let err = Error::Internal("bad app_key=abc".to_string());
        assert_eq!(err.log_safe(), "Internal error (details redacted)");

        let err = Error::Internal("boom".to_string());
        assert_eq!(err.log_safe(), "Internal error: boom");
    }

    #[test]
    fn test_status_mapping() {
        let response = Error::NotFound("Recipe 7 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = Error::Validation("Invalid data received".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = Error::UpstreamUnavailable(401).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
