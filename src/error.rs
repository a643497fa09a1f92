//! Error types for loading site content.

use thiserror::Error;

/// Failure fetching a single resource.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read body: {0}")]
    Body(String),
}

/// Failure loading the manifest or an article.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),

    #[error("invalid locator `{locator}`: {reason}")]
    Locator { locator: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed manifest: {0}")]
    Manifest(String),
}
