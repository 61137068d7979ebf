//! Router implementation for managing navigation
//!
//! A navigation runs in a fixed order: notify `before-navigate` listeners,
//! remember the outgoing scroll offset, repaint the sidebar, unload the
//! outgoing page's assets, render the requested page, defer header chrome and
//! scroll restore to the next tick, notify `after-navigate` listeners and
//! finally commit the new current page.

use super::aliases::AliasTable;
use super::dispatch::UiEvent;
use super::events::{EventBus, NavigationEvent, NavigationPhase};
use super::page::PageKey;
use super::registry::{LeaveHook, PageContext, PageRegistry};
use super::scheduler::{TickQueue, TickReport};
use super::state::NavigationState;
use super::templates::TemplateStore;
use crate::config::RouterSettings;
use crate::document::Document;
use crate::error::RouterError;
use serde_json::{Map, Value};

/// Type alias for router construction results
pub type RouterResult<T> = Result<T, RouterError>;

/// What a navigation request ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested page was rendered
    Rendered(PageKey),
    /// The requested key is unregistered and the fallback page was rendered
    Fallback { requested: PageKey, rendered: PageKey },
    /// The requested key is unregistered; nothing changed
    Unregistered(PageKey),
    /// The render procedure failed; `swapped` tells whether the markup was replaced
    RenderFailed { page: PageKey, swapped: bool },
}

impl NavigationOutcome {
    /// Whether the document now shows a different page's markup
    pub fn changed_content(&self) -> bool {
        match self {
            NavigationOutcome::Rendered(_) | NavigationOutcome::Fallback { .. } => true,
            NavigationOutcome::Unregistered(_) => false,
            NavigationOutcome::RenderFailed { swapped, .. } => *swapped,
        }
    }
}

/// Main router struct that owns the navigation state and the document
pub struct Router {
    registry: PageRegistry,
    templates: TemplateStore,
    aliases: AliasTable,
    state: NavigationState,
    document: Document,
    queue: TickQueue,
    events: EventBus,
    leave_hooks: Vec<LeaveHook>,
    globals: Map<String, Value>,
    fallback_page: Option<PageKey>,
    max_settle_ticks: usize,
}

impl Router {
    /// Create a new router over an empty document
    pub fn new(
        registry: PageRegistry,
        templates: TemplateStore,
        settings: &RouterSettings,
    ) -> RouterResult<Self> {
        let fallback_page = settings.fallback_page.clone().map(PageKey::from);
        if let Some(fallback) = &fallback_page {
            if !registry.contains(fallback.as_str()) {
                return Err(RouterError::FallbackPageMissing(fallback.0.clone()));
            }
        }

        Ok(Self {
            registry,
            templates,
            aliases: AliasTable::new(settings.aliases.clone()),
            state: NavigationState::new(settings.max_history),
            document: Document::new(settings.viewport_rows),
            queue: TickQueue::new(),
            events: EventBus::new(),
            leave_hooks: Vec::new(),
            globals: Map::new(),
            fallback_page,
            max_settle_ticks: settings.max_settle_ticks,
        })
    }

    /// Get the navigation state
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Get the current page key
    pub fn current_page(&self) -> Option<&PageKey> {
        self.state.current_page()
    }

    pub fn registry(&self) -> &PageRegistry {
        &self.registry
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Values available to every template render
    pub fn set_template_globals(&mut self, globals: Map<String, Value>) {
        self.globals = globals;
    }

    /// Subscribe to a navigation notification
    pub fn subscribe<F>(&mut self, phase: NavigationPhase, listener: F)
    where
        F: FnMut(&NavigationEvent) -> anyhow::Result<()> + 'static,
    {
        self.events.subscribe(phase, listener);
    }

    /// Navigate to the default page
    pub fn start(&mut self) -> Option<NavigationOutcome> {
        let page = self.registry.default_page()?.clone();
        Some(self.navigate_to(page))
    }

    /// Navigate to a page
    pub fn navigate_to(&mut self, requested: impl Into<PageKey>) -> NavigationOutcome {
        let requested = requested.into();

        if self.registry.contains(requested.as_str()) {
            return self.perform(requested, true);
        }

        match self.fallback_page.clone() {
            Some(fallback) => {
                tracing::warn!(
                    "Page '{}' is not registered, showing '{}' instead",
                    requested,
                    fallback
                );
                match self.perform(fallback.clone(), true) {
                    NavigationOutcome::Rendered(_) => NavigationOutcome::Fallback {
                        requested,
                        rendered: fallback,
                    },
                    other => other,
                }
            }
            None => {
                tracing::warn!("Ignoring navigation to unregistered page '{}'", requested);
                NavigationOutcome::Unregistered(requested)
            }
        }
    }

    /// Go back to the previous page in history
    pub fn go_back(&mut self) -> Option<NavigationOutcome> {
        let previous = self.state.pop_history()?;
        let outcome = self.perform(previous.clone(), false);
        if !outcome.changed_content() {
            self.state.restore_history(previous);
        }
        Some(outcome)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    /// Forward a UI event carrying a navigation intent
    pub fn dispatch(&mut self, event: &UiEvent) -> Option<NavigationOutcome> {
        let page = event.navigation_intent()?;
        Some(self.navigate_to(page))
    }

    /// Number of tasks waiting for the next tick
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Run one tick of deferred work
    pub fn run_pending(&mut self) -> TickReport {
        self.queue.run_tick(&mut self.document)
    }

    /// Run ticks until no deferred work is left
    pub fn settle(&mut self) -> usize {
        self.queue.settle(&mut self.document, self.max_settle_ticks)
    }

    fn perform(&mut self, requested: PageKey, push_history: bool) -> NavigationOutcome {
        let previous = self.state.current_page().cloned();
        let event = NavigationEvent {
            from: previous.clone(),
            to: requested.clone(),
        };
        tracing::debug!(
            "Navigating {} -> {}",
            previous.as_ref().map(PageKey::as_str).unwrap_or("<none>"),
            requested
        );

        // 1. Outgoing page cleans up while its markup is still attached
        self.events.emit(NavigationPhase::Before, &event);
        for hook in self.leave_hooks.drain(..) {
            if let Err(e) = hook(&mut self.document) {
                tracing::error!("Leave hook failed: {:#}", e);
            }
        }

        // 2. Remember where the outgoing page was scrolled to
        if let Some(page) = &previous {
            let offset = self.document.container.scroll_top();
            self.state.record_scroll(page.clone(), offset);
        }

        // 3. Sidebar highlight
        self.paint_sidebar(&requested);

        // 4. Assets owned exclusively by the outgoing page
        if let Some(page) = previous.as_ref().filter(|page| **page != requested) {
            let removed = self.document.unload_assets_of(page);
            if removed > 0 {
                tracing::debug!("Unloaded {} asset(s) of '{}'", removed, page);
            }
        }

        // 5. Render
        let queued_before = self.queue.len();
        let hooks_before = self.leave_hooks.len();
        let Some((result, swapped)) = self.render(&requested) else {
            tracing::warn!("Ignoring navigation to unregistered page '{}'", requested);
            return NavigationOutcome::Unregistered(requested);
        };

        let outcome = match result {
            Ok(()) => NavigationOutcome::Rendered(requested.clone()),
            Err(e) => {
                tracing::error!("Rendering page '{}' failed: {:#}", requested, e);
                NavigationOutcome::RenderFailed {
                    page: requested.clone(),
                    swapped,
                }
            }
        };

        let committed = outcome.changed_content();
        if committed {
            // 6. Header chrome, once the new markup is committed
            let aliases = self.aliases.clone();
            let page = requested.clone();
            self.queue.defer("header-chrome", move |tick| {
                let header = &mut tick.document.header;
                header.clear_active();
                match aliases.resolve(&page, header) {
                    Some(key) => {
                        header.set_active(&key);
                    }
                    None => tracing::debug!("No header entry for page '{}'", page),
                }
                Ok(())
            });

            // 7. Scroll restore, once the new content has its height
            let offset = self.state.scroll_offset(requested.as_str()).unwrap_or(0);
            self.queue.defer("scroll-restore", move |tick| {
                tick.document.container.scroll_to(offset);
                Ok(())
            });
        } else {
            self.queue.truncate(queued_before);
            self.leave_hooks.truncate(hooks_before);
            self.recover_previous(&requested, previous.as_ref());
        }

        // 8.
        self.events.emit(NavigationPhase::After, &event);

        // 9.
        if committed {
            self.state.commit(requested, push_history);
        }

        outcome
    }

    /// Run the render procedure of a registered page; returns whether it swapped the markup
    fn render(&mut self, page: &PageKey) -> Option<(anyhow::Result<()>, bool)> {
        let entry = self.registry.get(page.as_str())?;
        let mut ctx = PageContext {
            page: &entry.key,
            title: &entry.title,
            document: &mut self.document,
            templates: &self.templates,
            globals: &self.globals,
            queue: &mut self.queue,
            leave_hooks: &mut self.leave_hooks,
            swapped: false,
        };
        let result = entry.render(&mut ctx);
        let swapped = ctx.swapped();
        Some((result, swapped))
    }

    /// Bring back the page that is still on screen after `failed` rendered nothing
    ///
    /// Its leave hooks already ran and its assets are gone, so it is rendered
    /// again at its current scroll offset.
    fn recover_previous(&mut self, failed: &PageKey, previous: Option<&PageKey>) {
        let Some(previous) = previous else {
            self.document.unload_assets_of(failed);
            self.document.sidebar.clear_active();
            return;
        };
        self.paint_sidebar(previous);
        if previous == failed {
            return;
        }
        self.document.unload_assets_of(failed);

        let offset = self.document.container.scroll_top();
        let queued_before = self.queue.len();
        match self.render(previous) {
            Some((Ok(()), _)) => {
                tracing::debug!("Restored '{}' after '{}' failed", previous, failed);
                self.queue.defer("scroll-restore", move |tick| {
                    tick.document.container.scroll_to(offset);
                    Ok(())
                });
            }
            Some((Err(e), _)) => {
                tracing::error!("Restoring page '{}' failed: {:#}", previous, e);
                self.queue.truncate(queued_before);
            }
            None => {}
        }
    }

    fn paint_sidebar(&mut self, page: &PageKey) {
        let sidebar = &mut self.document.sidebar;
        sidebar.clear_active();
        match self.aliases.resolve(page, sidebar) {
            Some(key) => {
                sidebar.set_active(&key);
            }
            None => tracing::warn!("No sidebar entry for page '{}'", page),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("current_page", &self.state.current_page())
            .field("pages", &self.registry.keys())
            .field("pending_tasks", &self.queue.len())
            .finish_non_exhaustive()
    }
}
