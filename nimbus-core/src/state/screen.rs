//! Screen definition and transitions

/// Events that move between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenEvent {
    /// Long press on the alarm-toggle button
    LongPress,
    /// The news display window elapsed
    NewsTimeout,
}

/// The five screens, in rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Date, time, and alarm status
    #[default]
    Default,
    TempHumidity,
    Weather,
    /// Location entry for the weather lookup
    UserInput,
    NewsFeed,
}

impl Screen {
    pub const COUNT: u8 = 5;

    pub const fn index(self) -> u8 {
        match self {
            Screen::Default => 0,
            Screen::TempHumidity => 1,
            Screen::Weather => 2,
            Screen::UserInput => 3,
            Screen::NewsFeed => 4,
        }
    }

    /// Decode a raw screen index; anything out of range falls back to Default
    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => Screen::TempHumidity,
            2 => Screen::Weather,
            3 => Screen::UserInput,
            4 => Screen::NewsFeed,
            _ => Screen::Default,
        }
    }

    /// Next screen in rotation
    pub const fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::COUNT)
    }

    /// Process an event and return the new screen
    pub fn transition(self, event: ScreenEvent) -> Screen {
        match (self, event) {
            (current, ScreenEvent::LongPress) => current.next(),
            (Screen::NewsFeed, ScreenEvent::NewsTimeout) => Screen::Default,
            (current, ScreenEvent::NewsTimeout) => current,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Screen::Default => "Clock",
            Screen::TempHumidity => "Climate",
            Screen::Weather => "Weather",
            Screen::UserInput => "Location",
            Screen::NewsFeed => "News",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_order() {
        assert_eq!(Screen::Default.next(), Screen::TempHumidity);
        assert_eq!(Screen::TempHumidity.next(), Screen::Weather);
        assert_eq!(Screen::Weather.next(), Screen::UserInput);
        assert_eq!(Screen::UserInput.next(), Screen::NewsFeed);
        assert_eq!(Screen::NewsFeed.next(), Screen::Default);
    }

    #[test]
    fn test_five_long_presses_return_to_start() {
        for index in 0..Screen::COUNT {
            let start = Screen::from_index(index);
            let end = (0..5).fold(start, |s, _| s.transition(ScreenEvent::LongPress));
            assert_eq!(end, start);
        }
    }

    #[test]
    fn test_out_of_range_index_self_heals() {
        assert_eq!(Screen::from_index(5), Screen::Default);
        assert_eq!(Screen::from_index(0xFF), Screen::Default);
    }

    #[test]
    fn test_news_timeout_only_leaves_news() {
        assert_eq!(
            Screen::NewsFeed.transition(ScreenEvent::NewsTimeout),
            Screen::Default
        );
        assert_eq!(
            Screen::Weather.transition(ScreenEvent::NewsTimeout),
            Screen::Weather
        );
    }
}
