//! Page identifiers

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier naming a navigable section of the dashboard
///
/// Any string is a valid key; whether it names a page is decided by the
/// registry at navigation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(pub String);

impl PageKey {
    /// Create a new page key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PageKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for PageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&PageKey> for PageKey {
    fn from(key: &PageKey) -> Self {
        key.clone()
    }
}
