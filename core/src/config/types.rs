//! Configuration types for SafeBite core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiSettings,
    /// Router behaviour
    #[serde(default)]
    pub router: RouterSettings,
    /// Navigable pages, in sidebar order
    #[serde(default)]
    pub pages: Vec<PageSettings>,
}

impl DashboardConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.key.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "pages[].key".to_string(),
                }
                .into());
            }
            if !seen.insert(page.key.as_str()) {
                return Err(ConfigError::DuplicatePage {
                    key: page.key.clone(),
                }
                .into());
            }
        }

        if let Some(default_page) = &self.router.default_page {
            if !seen.contains(default_page.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "router.default_page".to_string(),
                    value: default_page.clone(),
                }
                .into());
            }
        }

        if let Some(fallback_page) = &self.router.fallback_page {
            if !seen.contains(fallback_page.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "router.fallback_page".to_string(),
                    value: fallback_page.clone(),
                }
                .into());
            }
        }

        if self.router.viewport_rows == 0 {
            return Err(ConfigError::InvalidValue {
                field: "router.viewport_rows".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Get page settings by key
    pub fn page(&self, key: &str) -> Option<&PageSettings> {
        self.pages.iter().find(|page| page.key == key)
    }
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the REST backend
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page the client redirects to when the session is rejected
    #[serde(default = "default_login_page")]
    pub login_page: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_login_page() -> String {
    "login".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: default_timeout_secs(),
            login_page: default_login_page(),
        }
    }
}

/// Router behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Page shown when the shell starts
    #[serde(default)]
    pub default_page: Option<String>,
    /// Page rendered in place of unregistered keys (no-op when unset)
    #[serde(default)]
    pub fallback_page: Option<String>,
    /// Page key -> canonical sidebar key
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Visible rows of the content container
    #[serde(default = "default_viewport_rows")]
    pub viewport_rows: u16,
    /// Maximum number of back-history entries
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Upper bound on ticks drained by a single settle
    #[serde(default = "default_max_settle_ticks")]
    pub max_settle_ticks: usize,
}

fn default_viewport_rows() -> u16 {
    24
}

fn default_max_history() -> usize {
    50
}

fn default_max_settle_ticks() -> usize {
    64
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            default_page: None,
            fallback_page: None,
            aliases: HashMap::new(),
            viewport_rows: default_viewport_rows(),
            max_history: default_max_history(),
            max_settle_ticks: default_max_settle_ticks(),
        }
    }
}

/// A navigable page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSettings {
    /// Page key
    pub key: String,
    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
    /// Inline handlebars template
    #[serde(default)]
    pub template: Option<String>,
    /// Template file, relative to the configuration file
    #[serde(default)]
    pub template_file: Option<String>,
    /// Whether the page has its own sidebar entry
    #[serde(default = "default_true")]
    pub sidebar: bool,
    /// Whether the page has a header button
    #[serde(default)]
    pub header: bool,
    /// Page-scoped stylesheets and scripts
    #[serde(default)]
    pub assets: Vec<AssetSettings>,
}

fn default_true() -> bool {
    true
}

impl PageSettings {
    /// Create page settings with an inline template
    pub fn new(key: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            template: Some(template.into()),
            template_file: None,
            sidebar: true,
            header: false,
            assets: Vec::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Hide the page from the sidebar (alias views)
    pub fn without_sidebar(mut self) -> Self {
        self.sidebar = false;
        self
    }

    /// Add a header button for the page
    pub fn with_header(mut self) -> Self {
        self.header = true;
        self
    }

    /// Add a page-scoped asset
    pub fn with_asset(mut self, asset: AssetSettings) -> Self {
        self.assets.push(asset);
        self
    }

    /// Title, falling back to the key
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// Page-scoped stylesheet or script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Asset kind
    pub kind: AssetKind,
    /// Location of the asset
    pub href: String,
}

/// Kind of an injected asset tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Stylesheet,
    Script,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DashboardConfig {
        DashboardConfig {
            pages: vec![
                PageSettings::new("dashboard", "<h1>Dashboard</h1>"),
                PageSettings::new("config", "<h1>Config</h1>"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_pages() {
        let mut config = sample();
        config.pages.push(PageSettings::new("config", "again"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate page key"));
    }

    #[test]
    fn test_validate_rejects_unknown_default_page() {
        let mut config = sample();
        config.router.default_page = Some("reports".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("router.default_page"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{
                "api": { "base_url": "https://safebite.example/api" },
                "pages": [{ "key": "users", "template": "<ul></ul>" }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.login_page, "login");
        assert_eq!(config.router.viewport_rows, 24);
        assert!(config.pages[0].sidebar);
        assert!(!config.pages[0].header);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_asset_kind_serde() {
        let asset: AssetSettings =
            serde_json::from_str(r#"{ "kind": "stylesheet", "href": "/css/charts.css" }"#).unwrap();
        assert_eq!(asset.kind, AssetKind::Stylesheet);
    }
}
