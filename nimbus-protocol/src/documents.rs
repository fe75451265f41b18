//! Documents carried over the modem link
//!
//! These are the already-parsed results of the web lookups performed by the
//! co-processor. They are small, fixed-capacity, and postcard-encoded on the
//! wire.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Maximum length of a location query ("Oslo", "San Francisco, CA")
pub const LOCATION_LEN: usize = 32;

/// Maximum stored length of a single headline
pub const HEADLINE_LEN: usize = 120;

/// Maximum length of a weather condition label
pub const CONDITION_LEN: usize = 24;

/// Maximum length of a timezone name
pub const TIMEZONE_LEN: usize = 32;

/// A location query string
pub type Location = String<LOCATION_LEN>;

/// Current date/time for the device's location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDocument {
    /// Seconds since the Unix epoch (UTC)
    pub unix_secs: u64,
    /// Offset from UTC in seconds, daylight saving included
    pub utc_offset_secs: i32,
    /// Whether daylight saving time is in effect
    pub dst: bool,
    /// IANA timezone name, e.g. "Europe/Oslo"
    pub timezone: String<TIMEZONE_LEN>,
}

impl TimeDocument {
    /// Local wall-clock seconds since the epoch
    pub fn local_secs(&self) -> u64 {
        self.unix_secs
            .saturating_add_signed(i64::from(self.utc_offset_secs))
    }
}

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSummary {
    /// Location the lookup resolved to
    pub location: Location,
    /// Condition label, e.g. "Light rain"
    pub condition: String<CONDITION_LEN>,
    /// Temperature in 0.1°C units
    pub temp_c_x10: i16,
    /// Relative humidity in percent
    pub humidity_pct: u8,
}

/// One news headline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Headline {
    pub text: String<HEADLINE_LEN>,
}

impl Headline {
    /// Build a headline, cutting the text at a character boundary if needed
    pub fn new(text: &str) -> Self {
        Self {
            text: truncated(text),
        }
    }
}

/// Copy `text` into a fixed-capacity string, dropping what does not fit
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_secs_applies_offset() {
        let doc = TimeDocument {
            unix_secs: 1_000_000,
            utc_offset_secs: 7_200,
            dst: true,
            timezone: truncated("Europe/Oslo"),
        };
        assert_eq!(doc.local_secs(), 1_007_200);
    }

    #[test]
    fn test_local_secs_negative_offset_saturates() {
        let doc = TimeDocument {
            unix_secs: 100,
            utc_offset_secs: -3_600,
            dst: false,
            timezone: truncated("America/New_York"),
        };
        assert_eq!(doc.local_secs(), 0);
    }

    #[test]
    fn test_headline_truncates_at_char_boundary() {
        let long = "é".repeat(HEADLINE_LEN);
        let headline = Headline::new(&long);
        // 'é' is two bytes, so only half of them fit
        assert_eq!(headline.text.chars().count(), HEADLINE_LEN / 2);
    }

    #[test]
    fn test_documents_postcard_roundtrip() {
        let weather = WeatherSummary {
            location: truncated("Oslo"),
            condition: truncated("Light snow"),
            temp_c_x10: -35,
            humidity_pct: 81,
        };
        let mut buf = [0u8; 128];
        let used = postcard::to_slice(&weather, &mut buf).unwrap();
        let decoded: WeatherSummary = postcard::from_bytes(used).unwrap();
        assert_eq!(decoded, weather);
    }
}
