//! Current screen plus the per-screen bookkeeping that goes with it

use super::screen::{Screen, ScreenEvent};
use crate::config::NEWS_DISPLAY_MS;

/// Start of the current visit to the news screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NewsFeedWindow {
    pub started_ms: u64,
}

impl NewsFeedWindow {
    pub fn has_elapsed(&self, now_ms: u64, duration_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= duration_ms
    }
}

/// Owns the current screen
///
/// Entry bookkeeping happens inside the transition itself, so it runs once
/// per transition no matter how often the main loop ticks afterwards.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    news_window: Option<NewsFeedWindow>,
    news_display_ms: u64,
    /// Set by user-initiated rotation; consumed by the renderer
    clear_pending: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NEWS_DISPLAY_MS)
    }
}

impl Navigator {
    pub const fn new(news_display_ms: u64) -> Self {
        Self {
            current: Screen::Default,
            news_window: None,
            news_display_ms,
            clear_pending: false,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn news_window(&self) -> Option<NewsFeedWindow> {
        self.news_window
    }

    /// Rotate to the next screen on a long press at `at_ms`
    pub fn rotate(&mut self, at_ms: u64) -> Screen {
        let next = self.current.transition(ScreenEvent::LongPress);
        self.enter(next, at_ms);
        self.clear_pending = true;
        next
    }

    /// Leave the news screen once its window has elapsed
    ///
    /// Returns `true` if the screen changed. This transition leaves the
    /// render cache alone.
    pub fn check_timeout(&mut self, now_ms: u64) -> bool {
        let expired = self
            .news_window
            .is_some_and(|w| w.has_elapsed(now_ms, self.news_display_ms));
        if self.current != Screen::NewsFeed || !expired {
            return false;
        }
        let next = self.current.transition(ScreenEvent::NewsTimeout);
        self.enter(next, now_ms);
        true
    }

    /// Whether the display should be wiped before the next render
    pub fn take_clear(&mut self) -> bool {
        core::mem::take(&mut self.clear_pending)
    }

    fn enter(&mut self, screen: Screen, now_ms: u64) {
        self.current = screen;
        self.news_window = match screen {
            Screen::NewsFeed => Some(NewsFeedWindow { started_ms: now_ms }),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_news(nav: &mut Navigator, at_ms: u64) {
        while nav.current() != Screen::UserInput {
            nav.rotate(0);
        }
        assert_eq!(nav.rotate(at_ms), Screen::NewsFeed);
    }

    #[test]
    fn test_news_window_scenario() {
        let mut nav = Navigator::new(30_000);
        to_news(&mut nav, 0);

        assert!(!nav.check_timeout(29_000));
        assert_eq!(nav.current(), Screen::NewsFeed);

        assert!(nav.check_timeout(31_000));
        assert_eq!(nav.current(), Screen::Default);
        assert_eq!(nav.news_window(), None);
    }

    #[test]
    fn test_timeout_does_not_request_clear() {
        let mut nav = Navigator::new(30_000);
        to_news(&mut nav, 1_000);
        nav.take_clear();

        assert!(nav.check_timeout(40_000));
        assert!(!nav.take_clear());
    }

    #[test]
    fn test_rotate_requests_clear_once() {
        let mut nav = Navigator::default();
        nav.rotate(0);
        assert!(nav.take_clear());
        assert!(!nav.take_clear());
    }

    #[test]
    fn test_window_restarts_on_each_entry() {
        let mut nav = Navigator::new(30_000);
        to_news(&mut nav, 0);
        nav.rotate(10_000);
        assert_eq!(nav.current(), Screen::Default);
        to_news(&mut nav, 100_000);
        assert_eq!(
            nav.news_window(),
            Some(NewsFeedWindow { started_ms: 100_000 })
        );
        assert!(!nav.check_timeout(120_000));
    }

    #[test]
    fn test_timeout_ignored_off_news() {
        let mut nav = Navigator::new(30_000);
        nav.rotate(0);
        assert!(!nav.check_timeout(1_000_000));
        assert_eq!(nav.current(), Screen::TempHumidity);
    }
}
