//! Text rendering of the document

use colored::*;
use safebite_core::document::{ChromeBar, ChromeEntry};
use safebite_core::Router;
use std::fmt::Write;

/// Render header, sidebar and the visible part of the content container
pub fn render_document(router: &Router) -> String {
    let doc = router.document();
    let mut out = String::new();

    if !doc.header.is_empty() {
        let _ = writeln!(out, "{}", render_bar(&doc.header, " | "));
    }
    if !doc.sidebar.is_empty() {
        let _ = writeln!(out, "{} {}", "Menu:".dimmed(), render_bar(&doc.sidebar, "  "));
    }

    let page = router
        .current_page()
        .map(|page| page.as_str())
        .unwrap_or("(none)");
    let container = &doc.container;
    let _ = writeln!(
        out,
        "{}",
        format!(
            "── {} ── rows {}-{} of {}",
            page,
            container.scroll_top() + 1,
            (container.scroll_top() + u32::from(container.viewport_rows()))
                .min(container.content_rows()),
            container.content_rows()
        )
        .bold()
    );
    for line in container.visible_lines() {
        let _ = writeln!(out, "{}", line);
    }

    out
}

fn render_bar(bar: &ChromeBar, separator: &str) -> String {
    bar.entries()
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_entry(entry: &ChromeEntry) -> String {
    if entry.active {
        format!("[{}]", entry.label).green().bold().to_string()
    } else {
        entry.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::builtin_config;
    use crate::dashboard::build_router;

    #[test]
    fn test_render_marks_active_entries() {
        colored::control::set_override(false);
        let mut router = build_router(&builtin_config(), None).unwrap();
        router.navigate_to("devices");
        router.settle();

        let text = render_document(&router);
        assert!(text.contains("[Devices]"));
        assert!(!text.contains("[Dashboard]"));
        assert!(text.contains("── devices ── rows 1-"));
        assert!(text.contains("<table id=\"devices-table\">"));
    }

    #[test]
    fn test_render_before_first_navigation() {
        colored::control::set_override(false);
        let router = build_router(&builtin_config(), None).unwrap();
        let text = render_document(&router);
        assert!(text.contains("── (none) ── rows 1-0 of 0"));
    }
}
