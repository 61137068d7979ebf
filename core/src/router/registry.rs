//! Page registry and the context handed to render procedures

use super::page::PageKey;
use super::scheduler::{TickContext, TickQueue};
use super::templates::TemplateStore;
use crate::config::AssetKind;
use crate::document::Document;
use crate::error::RouterError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Render procedure of a page
///
/// Replaces the container markup and wires up the page, usually by deferring
/// its initializers to the next tick.
pub type RenderFn = Box<dyn Fn(&mut PageContext<'_>) -> anyhow::Result<()>>;

/// Cleanup registered by a page, run when the page is left
pub type LeaveHook = Box<dyn FnOnce(&mut Document) -> anyhow::Result<()>>;

/// A registered page
pub struct PageEntry {
    pub key: PageKey,
    pub title: String,
    pub is_default: bool,
    render: RenderFn,
}

impl PageEntry {
    pub(crate) fn render(&self, ctx: &mut PageContext<'_>) -> anyhow::Result<()> {
        (self.render)(ctx)
    }
}

impl std::fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageEntry")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("is_default", &self.is_default)
            .finish_non_exhaustive()
    }
}

/// Everything a render procedure may touch
pub struct PageContext<'a> {
    pub(crate) page: &'a PageKey,
    pub(crate) title: &'a str,
    pub(crate) document: &'a mut Document,
    pub(crate) templates: &'a TemplateStore,
    pub(crate) globals: &'a Map<String, Value>,
    pub(crate) queue: &'a mut TickQueue,
    pub(crate) leave_hooks: &'a mut Vec<LeaveHook>,
    pub(crate) swapped: bool,
}

impl PageContext<'_> {
    /// Key of the page being rendered
    pub fn page(&self) -> &PageKey {
        self.page
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn document(&self) -> &Document {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    /// Replace the container markup
    pub fn swap_content(&mut self, markup: impl Into<String>) {
        self.document.container.set_markup(markup);
        self.swapped = true;
    }

    /// Render the page's template and swap it into the container
    pub fn swap_template(&mut self) -> anyhow::Result<()> {
        if !self.templates.contains(self.page.as_str()) {
            return Err(RouterError::Template {
                page: self.page.to_string(),
                message: "no template registered".to_string(),
            }
            .into());
        }
        let markup = self.templates.render(self.page, self.title, self.globals)?;
        self.swap_content(markup);
        Ok(())
    }

    /// Whether the container markup has been replaced during this render
    pub fn swapped(&self) -> bool {
        self.swapped
    }

    /// Inject a stylesheet or script owned by this page
    pub fn load_asset(&mut self, kind: AssetKind, href: impl Into<String>) -> bool {
        self.document.inject_asset(kind, href, self.page.clone())
    }

    /// Run an initializer on the next tick, once the new markup is attached
    pub fn defer<F>(&mut self, label: impl Into<String>, initializer: F)
    where
        F: FnOnce(&mut TickContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.queue.defer(label, initializer);
    }

    /// Register cleanup to run before this page's markup is replaced
    pub fn on_leave<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut Document) -> anyhow::Result<()> + 'static,
    {
        self.leave_hooks.push(Box::new(hook));
    }
}

/// Immutable map from page key to render procedure
#[derive(Debug)]
pub struct PageRegistry {
    entries: HashMap<PageKey, PageEntry>,
    order: Vec<PageKey>,
    default_page: Option<PageKey>,
}

impl PageRegistry {
    pub fn builder() -> PageRegistryBuilder {
        PageRegistryBuilder::new()
    }

    pub fn get(&self, key: &str) -> Option<&PageEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Page keys in registration order
    pub fn keys(&self) -> &[PageKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Page shown at start-up: the declared default, else the first registered
    pub fn default_page(&self) -> Option<&PageKey> {
        self.default_page.as_ref().or_else(|| self.order.first())
    }
}

/// Builder for [`PageRegistry`]
pub struct PageRegistryBuilder {
    entries: Vec<PageEntry>,
    default_page: Option<PageKey>,
}

impl PageRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            default_page: None,
        }
    }

    /// Add a page with its render procedure
    pub fn page<F>(mut self, key: impl Into<PageKey>, title: impl Into<String>, render: F) -> Self
    where
        F: Fn(&mut PageContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.entries.push(PageEntry {
            key: key.into(),
            title: title.into(),
            is_default: false,
            render: Box::new(render),
        });
        self
    }

    /// Add a page that only swaps in its template
    pub fn template_page(self, key: impl Into<PageKey>, title: impl Into<String>) -> Self {
        self.page(key, title, |ctx| ctx.swap_template())
    }

    /// Add a page that swaps in its template and then runs `init`
    pub fn template_page_with<F>(self, key: impl Into<PageKey>, title: impl Into<String>, init: F) -> Self
    where
        F: Fn(&mut PageContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.page(key, title, move |ctx| {
            ctx.swap_template()?;
            init(ctx)
        })
    }

    /// Set the default page
    pub fn default(mut self, key: impl Into<PageKey>) -> Self {
        self.default_page = Some(key.into());
        self
    }

    /// Build the registry
    pub fn build(self) -> Result<PageRegistry, RouterError> {
        if self.entries.is_empty() {
            return Err(RouterError::NoPages);
        }

        let mut entries = HashMap::new();
        let mut order = Vec::new();
        for mut entry in self.entries {
            if entries.contains_key(&entry.key) {
                return Err(RouterError::DuplicatePage(entry.key.0));
            }
            entry.is_default = self.default_page.as_ref() == Some(&entry.key);
            order.push(entry.key.clone());
            entries.insert(entry.key.clone(), entry);
        }

        if let Some(default_page) = &self.default_page {
            if !entries.contains_key(default_page) {
                return Err(RouterError::DefaultPageMissing(default_page.0.clone()));
            }
        }

        Ok(PageRegistry {
            entries,
            order,
            default_page: self.default_page,
        })
    }
}

impl Default for PageRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builder() {
        let registry = PageRegistry::builder()
            .template_page("dashboard", "Dashboard")
            .template_page("users", "Users")
            .default("users")
            .build()
            .expect("Failed to build registry");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_page().map(|p| p.as_str()), Some("users"));
        assert!(registry.get("users").map(|e| e.is_default).unwrap_or(false));
        let keys: Vec<_> = registry.keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["dashboard", "users"]);
    }

    #[test]
    fn test_default_falls_back_to_first_page() {
        let registry = PageRegistry::builder()
            .template_page("config", "Config")
            .template_page("feedback", "Feedback")
            .build()
            .unwrap();
        assert_eq!(registry.default_page().map(|p| p.as_str()), Some("config"));
    }

    #[test]
    fn test_router_error_types() {
        let err = PageRegistry::builder().build().unwrap_err();
        assert_eq!(err.to_string(), "No pages registered");

        let err = PageRegistry::builder()
            .template_page("users", "Users")
            .template_page("users", "Users again")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Page 'users' registered twice");

        let err = PageRegistry::builder()
            .template_page("users", "Users")
            .default("missing")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Default page 'missing' is not registered");
    }
}
