//! Wall clock anchored to the monotonic timer

use nimbus_protocol::TimeDocument;

use super::Timestamp;

/// Local wall time derived from the last time document
///
/// The document is pinned to the monotonic instant it was applied at; wall
/// time in between syncs is that anchor plus elapsed monotonic time.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock {
    anchor: Option<Anchor>,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    local_secs: u64,
    mono_ms: u64,
}

impl WallClock {
    pub const fn new() -> Self {
        Self { anchor: None }
    }

    /// Pin a fetched document to the monotonic instant it was read at
    pub fn sync(&mut self, doc: &TimeDocument, now_ms: u64) {
        self.anchor = Some(Anchor {
            local_secs: doc.local_secs(),
            mono_ms: now_ms,
        });
    }

    pub fn is_synced(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current local time, or `None` before the first sync
    pub fn now(&self, now_ms: u64) -> Option<Timestamp> {
        self.anchor.map(|anchor| {
            let elapsed_s = now_ms.saturating_sub(anchor.mono_ms) / 1_000;
            Timestamp::from_secs(anchor.local_secs.saturating_add(elapsed_s))
        })
    }
}
