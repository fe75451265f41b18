//! GPIO status LED
//!
//! Heartbeat output driven from a plain GPIO pin.

use embedded_hal::digital::OutputPin;
use nimbus_core::traits::Indicator;

/// LED on a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct LedIndicator<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    /// Current logical state (true = lit)
    lit: bool,
}

impl<P: OutputPin> LedIndicator<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            lit: false,
        };
        // Start dark
        led.set_lit(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
        // A failed pin write leaves the heartbeat one blink out of phase
        let _ = if lit != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

impl<P: OutputPin> Indicator for LedIndicator<P> {
    fn toggle(&mut self) {
        self.set_lit(!self.lit);
    }
}
