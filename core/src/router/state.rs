//! Navigation state owned by a router

use super::page::PageKey;
use serde::Serialize;
use std::collections::HashMap;

/// Runtime navigation state
///
/// Never persisted: a fresh router always starts with no current page and no
/// recorded offsets.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationState {
    /// Page currently shown; `None` only before the first navigation
    current_page: Option<PageKey>,
    /// Scroll offset recorded when each visited page was last left
    scroll_offsets: HashMap<PageKey, u32>,
    /// Previously shown pages (most recent first)
    history: Vec<PageKey>,
    #[serde(skip)]
    max_history: usize,
}

impl NavigationState {
    /// Create an empty state keeping at most `max_history` back entries
    pub fn new(max_history: usize) -> Self {
        Self {
            current_page: None,
            scroll_offsets: HashMap::new(),
            history: Vec::new(),
            max_history,
        }
    }

    /// Get the current page
    pub fn current_page(&self) -> Option<&PageKey> {
        self.current_page.as_ref()
    }

    /// Offset recorded for `page`, if it has been left at least once
    pub fn scroll_offset(&self, page: &str) -> Option<u32> {
        self.scroll_offsets.get(page).copied()
    }

    pub fn scroll_offsets(&self) -> &HashMap<PageKey, u32> {
        &self.scroll_offsets
    }

    /// Record the offset of a page being left
    pub(crate) fn record_scroll(&mut self, page: PageKey, offset: u32) {
        self.scroll_offsets.insert(page, offset);
    }

    /// Make `page` current, optionally pushing the outgoing page onto the history
    pub(crate) fn commit(&mut self, page: PageKey, push_history: bool) {
        if push_history {
            if let Some(previous) = self.current_page.take() {
                if previous != page && self.max_history > 0 {
                    self.history.insert(0, previous);
                    self.history.truncate(self.max_history);
                }
            }
        }
        self.current_page = Some(page);
    }

    /// Pop the most recent history entry
    pub(crate) fn pop_history(&mut self) -> Option<PageKey> {
        if self.history.is_empty() {
            None
        } else {
            Some(self.history.remove(0))
        }
    }

    /// Put back an entry taken by [`Self::pop_history`]
    pub(crate) fn restore_history(&mut self, page: PageKey) {
        self.history.insert(0, page);
        self.history.truncate(self.max_history);
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Get the navigation history
    pub fn history(&self) -> &[PageKey] {
        &self.history
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let state = NavigationState::default();
        assert!(state.current_page().is_none());
        assert!(state.scroll_offsets().is_empty());
        assert!(!state.can_go_back());
    }

    #[test]
    fn test_commit_pushes_history() {
        let mut state = NavigationState::new(2);
        state.commit("dashboard".into(), true);
        state.commit("users".into(), true);
        state.commit("users".into(), true);
        state.commit("config".into(), true);
        state.commit("feedback".into(), true);

        assert_eq!(state.current_page().map(|p| p.as_str()), Some("feedback"));
        let history: Vec<_> = state.history().iter().map(|p| p.as_str()).collect();
        assert_eq!(history, vec!["config", "users"]);
    }

    #[test]
    fn test_history_disabled() {
        let mut state = NavigationState::new(0);
        state.commit("dashboard".into(), true);
        state.commit("users".into(), true);
        assert!(!state.can_go_back());
    }

    #[test]
    fn test_pop_history() {
        let mut state = NavigationState::new(10);
        state.commit("dashboard".into(), true);
        state.commit("users".into(), true);

        assert_eq!(state.pop_history(), Some(PageKey::from("dashboard")));
        assert_eq!(state.pop_history(), None);
    }

    #[test]
    fn test_restore_history_puts_entry_back_in_front() {
        let mut state = NavigationState::new(10);
        state.commit("dashboard".into(), true);
        state.commit("users".into(), true);
        state.commit("config".into(), true);

        let popped = state.pop_history().unwrap();
        state.restore_history(popped);
        let history: Vec<_> = state.history().iter().map(|p| p.as_str()).collect();
        assert_eq!(history, vec!["users", "dashboard"]);
    }
}
