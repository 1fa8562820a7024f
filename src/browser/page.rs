//! Monotonically growing display window over the sorted view.

/// Rows revealed per page. The window starts at one page.
pub const PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Copy)]
pub struct PageWindow {
    page_size: usize,
    limit: usize,
}

impl PageWindow {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            limit: page_size,
        }
    }

    /// Drop back to the first page. Called when filter inputs change,
    /// never for sort or pin changes.
    pub fn reset(&mut self) {
        self.limit = self.page_size;
    }

    /// Grow the window by one page. Past the end this only keeps
    /// `has_more` false.
    pub fn load_more(&mut self) {
        self.limit += self.page_size;
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        total > self.limit
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
