//! Text input trait

use nimbus_protocol::Location;

/// Source of typed location queries (serial console, on-screen keyboard)
pub trait TextInput {
    /// Take the most recently entered line, if any
    ///
    /// Must not block. Raw text is returned; validation happens in the
    /// controller. Overlong input arrives truncated.
    fn poll_line(&mut self) -> Option<Location>;
}
