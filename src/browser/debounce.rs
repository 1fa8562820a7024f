//! Commit-after-quiet-period policy for search input.

use std::time::{Duration, Instant};

/// Quiet period before a search edit reaches the pipeline.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Pending search text plus the deadline at which it commits.
///
/// Each new input replaces the pending value and restarts the quiet period,
/// so a burst of keystrokes commits once, with the final text. Time is
/// passed in explicitly; nothing here sleeps.
#[derive(Debug)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebounce {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a new input value, cancelling any pending one.
    pub fn set(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.delay));
    }

    /// Commit the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
