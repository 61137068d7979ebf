//! Machine-readable view of the router after a navigation

use safebite_core::Router;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssetSnapshot {
    pub id: String,
    pub kind: String,
    pub href: String,
    pub owner: String,
}

/// State shown by `navigate --json` and the shell's `state` command
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub current_page: Option<String>,
    pub scroll_top: u32,
    pub scroll_offsets: BTreeMap<String, u32>,
    pub history: Vec<String>,
    pub active_sidebar: Vec<String>,
    pub active_header: Vec<String>,
    pub assets: Vec<AssetSnapshot>,
}

impl Snapshot {
    pub fn capture(router: &Router) -> Self {
        let state = router.state();
        let doc = router.document();

        Self {
            current_page: router.current_page().map(ToString::to_string),
            scroll_top: doc.container.scroll_top(),
            scroll_offsets: state
                .scroll_offsets()
                .iter()
                .map(|(page, offset)| (page.to_string(), *offset))
                .collect(),
            history: state.history().iter().map(ToString::to_string).collect(),
            active_sidebar: doc.sidebar.active_keys().into_iter().map(String::from).collect(),
            active_header: doc.header.active_keys().into_iter().map(String::from).collect(),
            assets: doc
                .assets()
                .iter()
                .map(|tag| AssetSnapshot {
                    id: tag.id.to_string(),
                    kind: serde_json::to_value(tag.kind)
                        .ok()
                        .and_then(|value| value.as_str().map(String::from))
                        .unwrap_or_default(),
                    href: tag.href.clone(),
                    owner: tag.owner.to_string(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
