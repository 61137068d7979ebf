//! Page listing command

use crate::config::CliConfigLoader;
use anyhow::Result;
use colored::*;
use safebite_core::PageKey;
use tracing::info;

/// List configured pages with the sidebar entry each one highlights
pub async fn pages_command(config_loader: CliConfigLoader) -> Result<()> {
    let loaded = config_loader.load().await?;
    let config = &loaded.config;
    info!("Listing {} page(s) from {:?}", config.pages.len(), loaded.source);

    let router = crate::dashboard::build_router(config, None)?;
    let default_page = router.registry().default_page().cloned();
    let width = config.pages.iter().map(|page| page.key.len()).max().unwrap_or(0);

    for page in &config.pages {
        let key = PageKey::from(page.key.as_str());
        let canonical = router.aliases().canonical(&key);

        let mut flags = Vec::new();
        if default_page.as_ref() == Some(&key) {
            flags.push("default");
        }
        if page.header {
            flags.push("header");
        }
        if !page.sidebar {
            flags.push("hidden");
        }

        let highlight = if canonical == page.key {
            String::new()
        } else {
            format!(" -> {}", canonical)
        };
        println!(
            "{}  {}{}{}",
            format!("{:width$}", page.key).bold(),
            page.display_title(),
            highlight.dimmed(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            }
        );
    }

    Ok(())
}
