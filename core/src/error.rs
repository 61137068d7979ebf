//! Error types and handling for SafeBite Core

use thiserror::Error;

/// Result type alias for SafeBite core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SafeBite Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Router construction and template errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Duplicate page key in configuration: {key}")]
    DuplicatePage { key: String },
}

/// Errors raised while assembling a router
///
/// Navigation itself never fails: unknown pages and failing pages are
/// reported through [`crate::router::NavigationOutcome`] instead.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("No pages registered")]
    NoPages,

    #[error("Page '{0}' registered twice")]
    DuplicatePage(String),

    #[error("Default page '{0}' is not registered")]
    DefaultPageMissing(String),

    #[error("Fallback page '{0}' is not registered")]
    FallbackPageMissing(String),

    #[error("Template error for page '{page}': {message}")]
    Template { page: String, message: String },
}

/// Backend API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session rejected by the server, redirecting to '{redirect_to}'")]
    Unauthorized { redirect_to: String },

    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Request to '{path}' failed with status {status}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },
}

