//! Location query validation

use nimbus_protocol::{Location, LOCATION_LEN};

/// Why a typed location was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LocationError {
    Empty,
    TooLong,
    /// Contains control characters or symbols no place name uses
    InvalidCharacter,
}

/// Validate and normalize a typed location query
///
/// Surrounding whitespace is trimmed. Letters (any script), digits, spaces
/// and `, . - '` are accepted.
pub fn parse_location(text: &str) -> Result<Location, LocationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LocationError::Empty);
    }
    if text.len() > LOCATION_LEN {
        return Err(LocationError::TooLong);
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, ' ' | ',' | '.' | '-' | '\'');
    if !text.chars().all(allowed) {
        return Err(LocationError::InvalidCharacter);
    }

    let mut location = Location::new();
    location.push_str(text).map_err(|_| LocationError::TooLong)?;
    Ok(location)
}
