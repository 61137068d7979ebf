//! Dashboard assembly
//!
//! Turns a resolved [`DashboardConfig`] into a ready router: one registry
//! entry per configured page, sidebar and header chrome in configuration
//! order, and the signed-in session exposed to templates.

use anyhow::{Context, Result};
use safebite_core::router::{NavigationPhase, PageContext};
use safebite_core::{DashboardConfig, PageKey, PageRegistry, Router, Session, TemplateStore};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Marker the chart initializer looks for in page markup
const CHART_CANVAS: &str = "<canvas";

/// Build the dashboard router
pub fn build_router(config: &DashboardConfig, session: Option<&Session>) -> Result<Router> {
    build_router_with_charts(config, session, LiveCharts::default())
}

/// Build the dashboard router, tracking chart refreshes in `charts`
pub fn build_router_with_charts(
    config: &DashboardConfig,
    session: Option<&Session>,
    charts: LiveCharts,
) -> Result<Router> {
    let mut templates = TemplateStore::new();
    let mut builder = PageRegistry::builder();

    for page in &config.pages {
        let key = PageKey::from(page.key.as_str());
        let template = page.template.as_deref().unwrap_or_default();
        templates
            .register(&key, template)
            .with_context(|| format!("Invalid template for page '{}'", page.key))?;

        let assets = page.assets.clone();
        let has_charts = template.contains(CHART_CANVAS);
        let charts = charts.clone();
        builder = builder.page(key, page.display_title(), move |ctx| {
            ctx.swap_template()?;
            for asset in &assets {
                ctx.load_asset(asset.kind, asset.href.clone());
            }
            if has_charts {
                mount_charts(ctx, charts.clone());
            }
            Ok(())
        });
    }

    if let Some(default_page) = start_page(config, session) {
        builder = builder.default(default_page);
    }

    let registry = builder.build().context("Failed to build page registry")?;
    let mut router =
        Router::new(registry, templates, &config.router).context("Failed to create router")?;

    let document = router.document_mut();
    for page in &config.pages {
        if page.sidebar {
            document.sidebar.push(page.key.as_str(), page.display_title());
        }
        if page.header {
            document.header.push(page.key.as_str(), page.display_title());
        }
    }

    if let Some(session) = session {
        router.set_template_globals(session.template_globals());
    }

    router.subscribe(NavigationPhase::After, |event| {
        debug!(
            "Now showing '{}' (was {})",
            event.to,
            event.from.as_ref().map(PageKey::as_str).unwrap_or("nothing")
        );
        Ok(())
    });

    Ok(router)
}

/// Configured default page, else the signed-in role's home page when it exists
fn start_page(config: &DashboardConfig, session: Option<&Session>) -> Option<String> {
    if let Some(page) = &config.router.default_page {
        return Some(page.clone());
    }
    session
        .map(|session| session.role.home_page())
        .filter(|home| config.page(home).is_some())
        .map(str::to_string)
}

/// Chart refresh loops currently running, counted in canvases per page
#[derive(Debug, Clone, Default)]
pub struct LiveCharts(Rc<RefCell<HashMap<PageKey, usize>>>);

impl LiveCharts {
    /// Canvases refreshing across all pages
    pub fn running(&self) -> usize {
        self.0.borrow().values().sum()
    }

    pub fn running_on(&self, page: &str) -> usize {
        self.0.borrow().get(page).copied().unwrap_or(0)
    }

    fn start(&self, page: &PageKey, canvases: usize) {
        *self.0.borrow_mut().entry(page.clone()).or_default() += canvases;
    }

    fn stop(&self, page: &PageKey) -> usize {
        self.0.borrow_mut().remove(page).unwrap_or(0)
    }
}

/// Attach live chart rendering to every canvas of the page
///
/// Drawing waits for the next tick so the canvases are attached. Leaving the
/// page stops its refresh, including a draw that has not run yet.
fn mount_charts(ctx: &mut PageContext<'_>, charts: LiveCharts) {
    let page = ctx.page().clone();
    let mounted = Rc::new(Cell::new(true));

    let draw_page = page.clone();
    let draw_charts = charts.clone();
    let still_mounted = mounted.clone();
    ctx.defer(format!("charts:{}", page), move |tick| {
        if !still_mounted.get() {
            debug!("'{}' was left before its charts were drawn", draw_page);
            return Ok(());
        }

        let container = &mut tick.document.container;
        let mut canvases = 0;
        let markup = container
            .markup()
            .lines()
            .map(|line| {
                if line.contains(CHART_CANVAS) {
                    canvases += 1;
                    format!("{} [live]", line)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        if canvases == 0 {
            debug!("No chart canvas left on '{}', skipping draw", draw_page);
            return Ok(());
        }

        container.set_markup(markup);
        draw_charts.start(&draw_page, canvases);
        Ok(())
    });

    ctx.on_leave(move |_| {
        mounted.set(false);
        let stopped = charts.stop(&page);
        debug!("Stopped {} chart refresh(es) on '{}'", stopped, page);
        Ok(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::builtin_config;
    use safebite_core::{NavigationOutcome, Role};

    #[test]
    fn test_builtin_dashboard_navigation() {
        let config = builtin_config();
        let mut router = build_router(&config, None).unwrap();

        assert_eq!(
            router.start(),
            Some(NavigationOutcome::Rendered("dashboard".into()))
        );
        router.settle();

        let doc = router.document();
        assert!(doc.container.markup().contains("Signed in as guest"));
        assert!(doc.container.markup().contains("data-chart=\"gauge\"></canvas> [live]"));
        assert_eq!(doc.sidebar.active_keys(), vec!["dashboard"]);
        assert_eq!(doc.header.active_keys(), vec!["dashboard"]);
        assert_eq!(doc.assets().len(), 1);
    }

    #[test]
    fn test_detail_view_highlights_parent() {
        let config = builtin_config();
        let mut router = build_router(&config, None).unwrap();

        router.navigate_to("device-detail");
        router.settle();
        assert_eq!(router.document().sidebar.active_keys(), vec!["devices"]);

        router.navigate_to("analytics-detail");
        router.settle();
        assert_eq!(router.document().sidebar.active_keys(), vec!["analytics-summary"]);
        assert_eq!(router.document().header.active_keys(), vec!["analytics-summary"]);
    }

    #[test]
    fn test_session_reaches_templates() {
        let mut config = builtin_config();
        config.router.default_page = None;
        let session = Session::new("tok", Role::User, "kim");
        let mut router = build_router(&config, Some(&session)).unwrap();

        router.start();
        router.settle();
        assert_eq!(router.current_page().map(|p| p.as_str()), Some("user-dashboard"));
        assert!(router.document().container.markup().contains("Welcome back, kim."));
    }

    #[test]
    fn test_leaving_chart_page_stops_refresh() {
        let charts = LiveCharts::default();
        let mut router =
            build_router_with_charts(&builtin_config(), None, charts.clone()).unwrap();

        for _ in 0..3 {
            router.navigate_to("dashboard");
            router.settle();
            assert_eq!(charts.running_on("dashboard"), 3);
            assert_eq!(charts.running(), 3);

            router.navigate_to("analytics-summary");
            router.settle();
            assert_eq!(charts.running_on("dashboard"), 0);
            assert_eq!(charts.running(), 1);
        }

        router.navigate_to("users");
        router.settle();
        assert_eq!(charts.running(), 0);
    }

    #[test]
    fn test_chart_draw_skipped_when_left_before_tick() {
        let charts = LiveCharts::default();
        let mut router =
            build_router_with_charts(&builtin_config(), None, charts.clone()).unwrap();

        router.navigate_to("dashboard");
        router.navigate_to("users");
        router.settle();

        assert_eq!(charts.running(), 0);
        assert!(!router.document().container.markup().contains("[live]"));
    }

    #[test]
    fn test_leaving_chart_page_unloads_its_assets() {
        let config = builtin_config();
        let mut router = build_router(&config, None).unwrap();

        router.navigate_to("analytics-summary");
        router.settle();
        assert_eq!(router.document().assets().len(), 2);

        router.navigate_to("users");
        router.settle();
        assert!(router.document().assets().is_empty());
    }
}
