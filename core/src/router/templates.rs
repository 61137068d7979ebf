//! Template store
//!
//! Page templates are registered once at start-up and rendered with
//! handlebars when a page is swapped into the container.

use super::page::PageKey;
use crate::error::{Result, RouterError};
use handlebars::Handlebars;
use serde_json::{Map, Value};

/// Read-only store of page templates
pub struct TemplateStore {
    registry: Handlebars<'static>,
}

impl TemplateStore {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        Self { registry }
    }

    /// Register the template for `page`
    pub fn register(&mut self, page: &PageKey, template: &str) -> Result<()> {
        self.registry
            .register_template_string(page.as_str(), template)
            .map_err(|e| RouterError::Template {
                page: page.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    pub fn contains(&self, page: &str) -> bool {
        self.registry.has_template(page)
    }

    /// Render the template of `page` with `globals` plus `page` and `title`
    pub fn render(&self, page: &PageKey, title: &str, globals: &Map<String, Value>) -> Result<String> {
        let mut data = globals.clone();
        data.insert("page".to_string(), Value::String(page.to_string()));
        data.insert("title".to_string(), Value::String(title.to_string()));

        let markup = self
            .registry
            .render(page.as_str(), &Value::Object(data))
            .map_err(|e| RouterError::Template {
                page: page.to_string(),
                message: e.to_string(),
            })?;
        Ok(markup)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.registry.get_templates().keys().collect();
        names.sort();
        f.debug_struct("TemplateStore").field("templates", &names).finish()
    }
}
