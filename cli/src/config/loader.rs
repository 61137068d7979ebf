//! CLI configuration loader for SafeBite
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./safebite.json or ./.safebite/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/safebite/config.json or ~/.config/safebite/config.json
//! 4. Built-in SafeBite page table (no files)

use super::defaults::builtin_config;
use anyhow::{anyhow, Context, Result};
use safebite_core::DashboardConfig;
use std::path::{Path, PathBuf};

/// Template shown for pages configured without any template
const PLACEHOLDER_TEMPLATE: &str = "<h1>{{title}}</h1>\n<p>Nothing to show yet.</p>";

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

/// A loaded, resolved and validated configuration
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DashboardConfig,
    pub source: ConfigSource,
}

/// CLI configuration loader
#[derive(Debug, Clone, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    api_url_override: Option<String>,
    viewport_rows_override: Option<u16>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set API base URL override
    pub fn with_api_url_override(mut self, api_url: String) -> Self {
        self.api_url_override = Some(api_url);
        self
    }

    /// Set viewport height override
    pub fn with_viewport_rows_override(mut self, rows: u16) -> Self {
        self.viewport_rows_override = Some(rows);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<LoadedConfig> {
        // Step 1: Find and load base configuration
        let (mut config, source) = if let Some(override_path) = &self.config_override {
            let path = expand_path(override_path);
            let (config, file) = self.load_from_path(&path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?;
            (config, ConfigSource::File(file))
        } else {
            self.search_and_load().await?
        };

        // Step 2: Resolve template files relative to the config file
        let base_dir = match &source {
            ConfigSource::File(file) => file.parent().map(Path::to_path_buf),
            ConfigSource::Builtin => None,
        };
        self.resolve_templates(&mut config, base_dir.as_deref()).await?;

        // Step 3: Apply flag overrides
        if let Some(api_url) = &self.api_url_override {
            config.api.base_url = api_url.clone();
        }
        if let Some(rows) = self.viewport_rows_override {
            config.router.viewport_rows = rows;
        }

        // Step 4: Validate
        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        tracing::debug!("Loaded {} page(s) from {:?}", config.pages.len(), source);
        Ok(LoadedConfig { config, source })
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<(DashboardConfig, ConfigSource)> {
        let cwd = std::env::current_dir()?;
        let mut candidates = vec![
            cwd.join("safebite.json"),
            cwd.join(".safebite").join("config.json"),
        ];
        if let Some(config_dir) = self.get_xdg_config_dir() {
            candidates.push(config_dir.join("safebite").join("config.json"));
        }

        for candidate in candidates {
            if candidate.is_file() {
                let config = self.load_file(&candidate).await?;
                return Ok((config, ConfigSource::File(candidate)));
            }
        }

        Ok((builtin_config(), ConfigSource::Builtin))
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<(DashboardConfig, PathBuf)> {
        if path.is_file() {
            Ok((self.load_file(path).await?, path.to_path_buf()))
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                Ok((self.load_file(&config_file).await?, config_file))
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<DashboardConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Inline every `template_file`, and give template-less pages a placeholder
    async fn resolve_templates(&self, config: &mut DashboardConfig, base_dir: Option<&Path>) -> Result<()> {
        for page in &mut config.pages {
            if page.template.is_some() {
                continue;
            }

            let Some(file) = &page.template_file else {
                tracing::debug!("Page '{}' has no template, using placeholder", page.key);
                page.template = Some(PLACEHOLDER_TEMPLATE.to_string());
                continue;
            };

            let mut path = expand_path(Path::new(file));
            if path.is_relative() {
                if let Some(base_dir) = base_dir {
                    path = base_dir.join(path);
                }
            }

            let template = tokio::fs::read_to_string(&path).await.with_context(|| {
                format!(
                    "Failed to read template for page '{}': {}",
                    page.key,
                    path.display()
                )
            })?;
            page.template = Some(template);
        }
        Ok(())
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(xdg_config))
        } else {
            dirs::home_dir().map(|home| home.join(".config"))
        }
    }
}

/// Expand `~` and environment variables in a user-supplied path
fn expand_path(path: &Path) -> PathBuf {
    match shellexpand::full(&path.to_string_lossy()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}
