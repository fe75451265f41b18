//! Physical buttons and their edge events

/// The five front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Advance the alarm hour
    Hour,
    /// Advance the alarm minute
    Minute,
    /// Short press toggles the alarm, long press rotates the screen
    AlarmToggle,
    Snooze,
    Mute,
}

impl Button {
    pub const COUNT: usize = 5;

    pub const ALL: [Button; Self::COUNT] = [
        Button::Hour,
        Button::Minute,
        Button::AlarmToggle,
        Button::Snooze,
        Button::Mute,
    ];

    pub const fn index(self) -> usize {
        match self {
            Button::Hour => 0,
            Button::Minute => 1,
            Button::AlarmToggle => 2,
            Button::Snooze => 3,
            Button::Mute => 4,
        }
    }
}

/// Which way the contact moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Press,
    Release,
}

/// A raw edge with the monotonic time it was observed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub edge: Edge,
    pub at_ms: u64,
}

impl ButtonEvent {
    pub const fn press(button: Button, at_ms: u64) -> Self {
        Self {
            button,
            edge: Edge::Press,
            at_ms,
        }
    }

    pub const fn release(button: Button, at_ms: u64) -> Self {
        Self {
            button,
            edge: Edge::Release,
            at_ms,
        }
    }
}
