//! CLI command implementations

pub mod fetch;
pub mod navigate;
pub mod pages;
pub mod session;
pub mod shell;

pub use fetch::fetch_command;
pub use navigate::navigate_command;
pub use pages::pages_command;
pub use session::{login_command, logout_command, whoami_command};
pub use shell::shell_command;

use anyhow::{anyhow, Result};
use safebite_core::{CredentialStore, Session};
use std::path::PathBuf;
use tracing::warn;

/// Open the credential store at `path`, or at the default location
pub fn open_store(path: Option<PathBuf>) -> Result<CredentialStore> {
    path.or_else(CredentialStore::default_path)
        .map(CredentialStore::new)
        .ok_or_else(|| anyhow!("Could not determine a data directory; pass --session-file"))
}

/// Load the stored session; an unreadable session counts as signed out
pub async fn current_session(store: &CredentialStore) -> Option<Session> {
    match store.load().await {
        Ok(session) => session,
        Err(e) => {
            warn!("Ignoring unreadable session {}: {}", store.path().display(), e);
            None
        }
    }
}
