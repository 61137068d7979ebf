//! Backend access: stored credentials and the bearer-token REST client

pub mod client;
pub mod credentials;

pub use client::ApiClient;
pub use credentials::{CredentialStore, Role, Session};
