//! Navigation chrome: sidebar entries and header buttons

/// A navigation entry carrying a page-identifying key and an active flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeEntry {
    pub key: String,
    pub label: String,
    pub active: bool,
}

/// Ordered set of navigation entries (sidebar menu or header buttons)
#[derive(Debug, Clone, Default)]
pub struct ChromeBar {
    entries: Vec<ChromeEntry>,
}

impl ChromeBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; an existing entry with the same key is kept as is
    pub fn push(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        if self.contains(&key) {
            return;
        }
        self.entries.push(ChromeEntry {
            key,
            label: label.into(),
            active: false,
        });
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&ChromeEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Remove the active flag from every entry
    pub fn clear_active(&mut self) {
        for entry in &mut self.entries {
            entry.active = false;
        }
    }

    /// Flag `key` active; returns false when no entry carries that key
    pub fn set_active(&mut self, key: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                entry.active = true;
                true
            }
            None => false,
        }
    }

    pub fn active_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.active)
            .map(|entry| entry.key.as_str())
            .collect()
    }

    pub fn entries(&self) -> &[ChromeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_active_after_clear() {
        let mut bar = ChromeBar::new();
        bar.push("dashboard", "Dashboard");
        bar.push("users", "Users");

        assert!(bar.set_active("dashboard"));
        bar.clear_active();
        assert!(bar.set_active("users"));
        assert_eq!(bar.active_keys(), vec!["users"]);
    }

    #[test]
    fn test_missing_entry() {
        let mut bar = ChromeBar::new();
        bar.push("dashboard", "Dashboard");
        assert!(!bar.set_active("reports"));
        assert!(bar.active_keys().is_empty());
    }

    #[test]
    fn test_push_ignores_duplicates() {
        let mut bar = ChromeBar::new();
        bar.push("users", "Users");
        bar.push("users", "People");
        assert_eq!(bar.entries().len(), 1);
        assert_eq!(bar.get("users").map(|e| e.label.as_str()), Some("Users"));
    }
}
