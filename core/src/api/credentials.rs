//! Stored session credentials
//!
//! The server issues the bearer token; the client only keeps it between
//! invocations and forwards it with every request.

use crate::error::{ConfigError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;

/// Dashboard role of the signed-in account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Landing page after sign-in
    pub fn home_page(&self) -> &'static str {
        match self {
            Role::Admin => "dashboard",
            Role::User => "user-dashboard",
        }
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(ConfigError::InvalidValue {
                field: "role".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A stored session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub username: String,
    pub saved_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role,
            username: username.into(),
            saved_at: Utc::now(),
        }
    }

    /// Values exposed to page templates
    pub fn template_globals(&self) -> Map<String, Value> {
        let mut globals = Map::new();
        globals.insert("username".to_string(), Value::String(self.username.clone()));
        globals.insert("role".to_string(), Value::String(self.role.as_str().to_string()));
        globals.insert("is_admin".to_string(), Value::Bool(self.role == Role::Admin));
        globals
    }
}

/// File-backed credential store
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/safebite/session.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("safebite").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file means signed out
    pub async fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Persist a session, replacing any previous one
    pub async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content).await?;
        tracing::debug!("Saved session for '{}' to {}", session.username, self.path.display());
        Ok(())
    }

    /// Forget the stored session; returns whether one existed
    pub async fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().await.unwrap(), None);

        let session = Session::new("tok-123", Role::Admin, "inspector");
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        assert!(store.clear().await.unwrap());
        assert!(!store.clear().await.unwrap());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = CredentialStore::new(path);
        assert!(store.load().await.is_err());
    }

    #[test]
    fn test_role_parsing_and_home_pages() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap().home_page(), "user-dashboard");
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_template_globals() {
        let globals = Session::new("t", Role::User, "kim").template_globals();
        assert_eq!(globals["username"], Value::String("kim".to_string()));
        assert_eq!(globals["is_admin"], Value::Bool(false));
    }
}
