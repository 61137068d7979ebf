//! Delegated navigation dispatch
//!
//! One dispatch point receives every UI event and looks for a navigation
//! intent on the event target or its closest ancestor, the way a single
//! listener on the document body would.

use super::page::PageKey;
use std::collections::HashMap;

/// Attribute naming the page an element navigates to
pub const NAV_ATTRIBUTE: &str = "data-page";

/// Minimal element description carried by an event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: HashMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Shorthand for an element carrying a navigation intent
    pub fn nav_link(tag: impl Into<String>, page: impl Into<String>) -> Self {
        Self::new(tag).with_attr(NAV_ATTRIBUTE, page)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A UI event and its propagation path, target first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub path: Vec<Element>,
}

impl UiEvent {
    /// Event fired on `target`
    pub fn on(target: Element) -> Self {
        Self { path: vec![target] }
    }

    /// Add the next ancestor the event bubbles through
    pub fn through(mut self, ancestor: Element) -> Self {
        self.path.push(ancestor);
        self
    }

    /// Page named by the closest element carrying a non-empty intent
    pub fn navigation_intent(&self) -> Option<PageKey> {
        self.path
            .iter()
            .filter_map(|element| element.attr(NAV_ATTRIBUTE))
            .map(str::trim)
            .find(|page| !page.is_empty())
            .map(PageKey::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_on_target() {
        let event = UiEvent::on(Element::nav_link("a", "users"));
        assert_eq!(event.navigation_intent(), Some(PageKey::from("users")));
    }

    #[test]
    fn test_intent_from_closest_ancestor() {
        let event = UiEvent::on(Element::new("span").with_attr("class", "icon"))
            .through(Element::nav_link("li", "food-items"))
            .through(Element::nav_link("nav", "dashboard"));
        assert_eq!(event.navigation_intent(), Some(PageKey::from("food-items")));
    }

    #[test]
    fn test_no_intent() {
        let event = UiEvent::on(Element::new("button")).through(Element::nav_link("div", " "));
        assert_eq!(event.navigation_intent(), None);
    }
}
