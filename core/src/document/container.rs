//! Shared content container the router swaps page markup into

/// Scrollable region holding the markup of the visible page
///
/// Heights are measured in rows: one line of markup is one row, and the
/// viewport shows `viewport_rows` of them starting at `scroll_top`.
#[derive(Debug, Clone)]
pub struct ContentContainer {
    markup: String,
    scroll_top: u32,
    viewport_rows: u16,
    revision: u64,
}

impl ContentContainer {
    /// Create an empty container with the given viewport height
    pub fn new(viewport_rows: u16) -> Self {
        Self {
            markup: String::new(),
            scroll_top: 0,
            viewport_rows: viewport_rows.max(1),
            revision: 0,
        }
    }

    /// Current markup
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Replace the markup, keeping the scroll offset inside the new range
    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.markup = markup.into();
        self.revision += 1;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    /// Number of markup replacements so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current scroll offset in rows
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Scroll to `offset`, clamped to the scrollable range; returns the applied offset
    pub fn scroll_to(&mut self, offset: u32) -> u32 {
        self.scroll_top = offset.min(self.max_scroll());
        self.scroll_top
    }

    /// Total content height in rows
    pub fn content_rows(&self) -> u32 {
        self.markup.lines().count() as u32
    }

    /// Visible height in rows
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Resize the viewport
    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows.max(1);
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> u32 {
        self.content_rows()
            .saturating_sub(u32::from(self.viewport_rows))
    }

    /// Lines currently inside the viewport
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.markup
            .lines()
            .skip(self.scroll_top as usize)
            .take(self.viewport_rows as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: usize) -> String {
        (0..count)
            .map(|i| format!("row {}", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut container = ContentContainer::new(10);
        container.set_markup(rows(25));

        assert_eq!(container.max_scroll(), 15);
        assert_eq!(container.scroll_to(7), 7);
        assert_eq!(container.scroll_to(100), 15);
    }

    #[test]
    fn test_short_content_cannot_scroll() {
        let mut container = ContentContainer::new(10);
        container.set_markup(rows(3));
        assert_eq!(container.scroll_to(5), 0);
    }

    #[test]
    fn test_set_markup_clamps_existing_offset() {
        let mut container = ContentContainer::new(5);
        container.set_markup(rows(40));
        container.scroll_to(30);

        container.set_markup(rows(8));
        assert_eq!(container.scroll_top(), 3);
        assert_eq!(container.revision(), 2);
    }

    #[test]
    fn test_visible_lines_follow_scroll() {
        let mut container = ContentContainer::new(2);
        container.set_markup(rows(6));
        container.scroll_to(3);

        let visible: Vec<_> = container.visible_lines().collect();
        assert_eq!(visible, vec!["row 3", "row 4"]);
    }
}
