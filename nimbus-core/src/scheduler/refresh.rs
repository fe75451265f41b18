//! Refresh cadences for the three data sources

use heapless::Vec;

use crate::config::ClockConfig;
use crate::state::Screen;

use super::timer::RefreshTimer;

/// The data sources that are fetched over the network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchKind {
    Time,
    Weather,
    News,
}

impl FetchKind {
    pub const COUNT: usize = 3;

    pub const fn index(self) -> usize {
        match self {
            FetchKind::Time => 0,
            FetchKind::Weather => 1,
            FetchKind::News => 2,
        }
    }
}

/// Fetches that came due on one poll, in priority order
pub type DueFetches = Vec<FetchKind, { FetchKind::COUNT }>;

/// Independent timers for time, weather, and news
///
/// Time refreshes regardless of the screen shown. News and weather refresh
/// only while their screen is up, which also covers entry: a screen entered
/// after its cadence lapsed fetches on the first poll.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    time: RefreshTimer,
    weather: RefreshTimer,
    news: RefreshTimer,
}

impl RefreshScheduler {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            time: RefreshTimer::new(config.time_refresh_ms),
            weather: RefreshTimer::new(config.weather_refresh_ms),
            news: RefreshTimer::new(config.news_refresh_ms),
        }
    }

    pub fn poll(&mut self, now_ms: u64, screen: Screen) -> DueFetches {
        let mut due = DueFetches::new();
        // Capacity equals the number of kinds, so pushes cannot fail
        if self.time.poll(now_ms) {
            let _ = due.push(FetchKind::Time);
        }
        if screen == Screen::Weather && self.weather.poll(now_ms) {
            let _ = due.push(FetchKind::Weather);
        }
        if screen == Screen::NewsFeed && self.news.poll(now_ms) {
            let _ = due.push(FetchKind::News);
        }
        due
    }

    /// Record an on-demand fetch so the cadence counts from it
    pub fn mark(&mut self, kind: FetchKind, now_ms: u64) {
        match kind {
            FetchKind::Time => self.time.mark(now_ms),
            FetchKind::Weather => self.weather.mark(now_ms),
            FetchKind::News => self.news.mark(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> RefreshScheduler {
        RefreshScheduler::new(&ClockConfig::default())
    }

    #[test]
    fn test_time_refreshes_on_any_screen() {
        let mut sched = scheduler();
        assert_eq!(sched.poll(0, Screen::TempHumidity).as_slice(), &[FetchKind::Time]);
        assert!(sched.poll(30_000, Screen::Default).is_empty());
        assert_eq!(sched.poll(60_000, Screen::UserInput).as_slice(), &[FetchKind::Time]);
    }

    #[test]
    fn test_news_only_while_news_shown() {
        let mut sched = scheduler();
        assert_eq!(sched.poll(0, Screen::Default).as_slice(), &[FetchKind::Time]);
        // News was never fetched, so entering the news screen fetches at once
        assert_eq!(sched.poll(5_000, Screen::NewsFeed).as_slice(), &[FetchKind::News]);
        assert!(sched.poll(10_000, Screen::NewsFeed).is_empty());
        // Cadence lapses while elsewhere; nothing until the screen returns
        assert_eq!(sched.poll(960_000, Screen::Default).as_slice(), &[FetchKind::Time]);
        assert_eq!(sched.poll(965_000, Screen::NewsFeed).as_slice(), &[FetchKind::News]);
    }

    #[test]
    fn test_marked_weather_waits_for_cadence() {
        let mut sched = scheduler();
        sched.poll(0, Screen::Default);
        sched.mark(FetchKind::Weather, 1_000);
        assert!(sched.poll(5_000, Screen::Weather).is_empty());
        assert_eq!(
            sched.poll(901_000, Screen::Weather).as_slice(),
            &[FetchKind::Time, FetchKind::Weather]
        );
    }
}
