//! # SafeBite Core
//!
//! Core library for the SafeBite food-safety monitoring dashboard.
//!
//! This library provides the page router that drives the dashboard shell,
//! the headless document it renders into, and the client side of the REST
//! backend (stored session plus bearer-token requests).

// Core modules
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod router;

// Re-export commonly used types
pub use api::{ApiClient, CredentialStore, Role, Session};
pub use config::{ApiSettings, DashboardConfig, PageSettings, RouterSettings};
pub use document::Document;
pub use error::{Error, Result};
pub use router::{NavigationOutcome, PageKey, PageRegistry, Router, TemplateStore};

/// Current version of the safebite-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing on stderr
///
/// `RUST_LOG` wins when set; otherwise `debug` selects the debug level and
/// everything else logs at info.
pub fn init_tracing(debug: bool) {
    let filter = match std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => {
            tracing_subscriber::EnvFilter::new(directives)
        }
        _ => tracing_subscriber::EnvFilter::new(if debug { "debug" } else { "info" }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
