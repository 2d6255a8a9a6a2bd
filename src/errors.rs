//! Typed errors for credential exchange, catalog calls and aggregation.
//!
//! Catalog failures are cheap to clone so that fan-out paths can log and
//! swallow them while the interactive search path reports them verbatim.

use thiserror::Error;

/// Failures of the client-credentials token exchange.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The token endpoint could not be reached.
    #[error("token request failed: {0}")]
    Transport(String),

    /// The token endpoint answered with a non-success status.
    #[error("token request rejected with status {status}")]
    Rejected { status: u16 },

    /// The response body had no `access_token`.
    #[error("token response did not contain an access token")]
    MissingToken,

    #[error("token response could not be decoded: {0}")]
    Decoding(String),
}

/// Failures of a single call against the catalog search endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("catalog answered with status {0}")]
    Status(u16),

    #[error("unexpected response shape: {0}")]
    Decoding(String),

    /// HTTP 401, the bearer token is no longer accepted.
    #[error("access token expired")]
    AuthExpired,
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decoding(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decoding(err.to_string())
    }
}

/// Failure of an interactive combined search.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("cannot search without credentials: {0}")]
    Auth(#[from] AuthError),
}

/// Failure of a whole aggregation run. Per-keyword failures never end up here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("no credential available: {0}")]
    NoCredential(#[from] AuthError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    EnvFile(String),
}
