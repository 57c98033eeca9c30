//! Error types for the catalog engine.
//!
//! Library code returns [`CatalogError`]; the binary edge wraps with
//! `anyhow` context. Nothing in the query path treats an error as fatal,
//! so most variants exist to be logged and degraded from.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration loading or wrapped context errors.
    #[error(transparent)]
    Config(#[from] anyhow::Error),

    /// Transport failure, non-success status, or timeout talking to the
    /// package registry.
    #[error("Network error: {0}")]
    Network(String),

    /// One record in a batch failed validation. Batch processing drops the
    /// record instead of propagating this.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Cache bookkeeping failure.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Script template rendering failure.
    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn network(msg: impl Into<String>) -> Self {
        CatalogError::Network(msg.into())
    }

    pub fn invalid_record(msg: impl Into<String>) -> Self {
        CatalogError::InvalidRecord(msg.into())
    }

    /// Whether retrying the failed operation could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Network(_) | CatalogError::Cache(_))
    }

    /// Coarse category label for logging and error summaries.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::Config(_) => "config",
            CatalogError::Network(_) => "network",
            CatalogError::InvalidRecord(_) => "data",
            CatalogError::Cache(_) => "cache",
            CatalogError::Template(_) => "template",
            CatalogError::Io(_) => "io",
            CatalogError::Json(_) => "data",
        }
    }
}

impl From<config::ConfigError> for CatalogError {
    fn from(e: config::ConfigError) -> Self {
        CatalogError::Config(anyhow::anyhow!(e))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Network(e.to_string())
    }
}

impl From<minijinja::Error> for CatalogError {
    fn from(e: minijinja::Error) -> Self {
        CatalogError::Template(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_are_retryable() {
        assert!(CatalogError::network("connection refused").is_retryable());
        assert!(!CatalogError::invalid_record("missing name").is_retryable());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(CatalogError::network("timeout").category(), "network");
        assert_eq!(
            CatalogError::invalid_record("bad token").category(),
            "data"
        );
        assert_eq!(
            CatalogError::Template("missing block".into()).category(),
            "template"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let converted: CatalogError = err.into();
        assert_eq!(converted.category(), "data");
    }
}
