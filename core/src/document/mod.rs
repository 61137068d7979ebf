//! Headless document model
//!
//! The router reads and writes a small slice of the page: the shared content
//! container, the sidebar and header chrome, and the asset tags injected for
//! individual pages. Everything else about presentation lives outside.

pub mod chrome;
pub mod container;

pub use chrome::{ChromeBar, ChromeEntry};
pub use container::ContentContainer;

use crate::config::AssetKind;
use crate::router::PageKey;
use uuid::Uuid;

/// A stylesheet or script tag injected on behalf of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTag {
    pub id: Uuid,
    pub kind: AssetKind,
    pub href: String,
    /// Page that injected the tag and owns it exclusively
    pub owner: PageKey,
}

/// The document the router drives
#[derive(Debug, Clone)]
pub struct Document {
    pub container: ContentContainer,
    pub sidebar: ChromeBar,
    pub header: ChromeBar,
    assets: Vec<AssetTag>,
}

impl Document {
    /// Create an empty document with the given viewport height
    pub fn new(viewport_rows: u16) -> Self {
        Self {
            container: ContentContainer::new(viewport_rows),
            sidebar: ChromeBar::new(),
            header: ChromeBar::new(),
            assets: Vec::new(),
        }
    }

    /// Inject an asset tag owned by `owner`; returns false if `href` is already loaded
    pub fn inject_asset(&mut self, kind: AssetKind, href: impl Into<String>, owner: PageKey) -> bool {
        let href = href.into();
        if self.assets.iter().any(|tag| tag.href == href) {
            return false;
        }
        self.assets.push(AssetTag {
            id: Uuid::new_v4(),
            kind,
            href,
            owner,
        });
        true
    }

    /// Remove every asset tag owned by `owner`; returns how many were removed
    pub fn unload_assets_of(&mut self, owner: &PageKey) -> usize {
        let before = self.assets.len();
        self.assets.retain(|tag| &tag.owner != owner);
        before - self.assets.len()
    }

    pub fn assets(&self) -> &[AssetTag] {
        &self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_are_scoped_to_owner() {
        let mut doc = Document::new(10);
        let analytics = PageKey::from("analytics-summary");

        assert!(doc.inject_asset(AssetKind::Stylesheet, "/css/charts.css", analytics.clone()));
        assert!(doc.inject_asset(AssetKind::Script, "/js/gauge.js", analytics.clone()));
        assert!(doc.inject_asset(AssetKind::Script, "/js/users.js", PageKey::from("users")));

        assert_eq!(doc.unload_assets_of(&analytics), 2);
        assert_eq!(doc.assets().len(), 1);
        assert_eq!(doc.assets()[0].href, "/js/users.js");
    }

    #[test]
    fn test_inject_asset_deduplicates_by_href() {
        let mut doc = Document::new(10);
        assert!(doc.inject_asset(AssetKind::Script, "/js/gauge.js", PageKey::from("dashboard")));
        assert!(!doc.inject_asset(AssetKind::Script, "/js/gauge.js", PageKey::from("dashboard")));
        assert_eq!(doc.assets().len(), 1);
    }
}
