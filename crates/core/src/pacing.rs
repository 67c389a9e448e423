//! Inter-fragment send pacing.
//!
//! The wire is open-loop — there is no feedback from the receiver — so the
//! only flow control available to the sender is a pause between consecutive
//! datagrams, keeping bursts from overrunning the receiver's socket buffer.
//! The policy is injected into the [`Caster`](crate::Caster) and fully
//! decoupled from the protocol codec, so it can be tuned or swapped without
//! touching fragmentation.

use std::thread;
use std::time::Duration;

/// Default pause between consecutive fragments of one frame.
pub const DEFAULT_FRAGMENT_GAP: Duration = Duration::from_micros(150);

/// How the sender spaces consecutive fragment sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// No pause — send fragments back to back.
    None,
    /// Sleep a fixed interval between consecutive fragments. A heuristic
    /// rate limit, not a delivery guarantee.
    FixedDelay(Duration),
}

impl PacingPolicy {
    /// Pause between two consecutive fragment sends.
    pub fn pause(&self) {
        match self {
            Self::None => {}
            Self::FixedDelay(gap) => thread::sleep(*gap),
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::FixedDelay(DEFAULT_FRAGMENT_GAP)
    }
}
