//! Fragment framing protocol: header codec, fragmentation planning, and
//! frame sequencing.
//!
//! Each compressed video frame is split into one or more UDP-sized
//! fragments. Every fragment carries a small fixed header:
//!
//! ```text
//! +-------------------------------+--------+--------+--------+----------+
//! | Capture timestamp (8 bytes)   | Frame  | Frag   | Frag   | Payload  |
//! | f64 seconds since UNIX epoch, | seq    | index  | count  | (up to   |
//! | native byte order — only when | (1 B)  | (1 B)  | (1 B)  | max      |
//! | the latency probe is enabled  |        |        |        | payload) |
//! +-------------------------------+--------+--------+--------+----------+
//! ```
//!
//! The timestamp field exists only in the [`ProtocolVariant::WithTimestamp`]
//! layout (11-byte header); without it the header is 3 bytes. The variant is
//! agreed out-of-band and shared by both wire ends — it is configuration,
//! never negotiated in-band, and mixing variants across endpoints is a
//! configuration error.
//!
//! All per-fragment counters are deliberately 8-bit:
//!
//! - **Frame sequence** wraps modulo [`SEQ_MODULUS`]. A receiver cannot tell
//!   "256 frames lost" from "none lost"; that is an accepted limitation of
//!   the wire format, not a bug.
//! - **Fragment index/count** cap a frame at [`MAX_FRAGMENTS_PER_FRAME`]
//!   fragments, i.e. `255 * max_payload` bytes. Frames beyond the ceiling
//!   are rejected whole ([`CastError::FrameTooLarge`]), never truncated.
//!
//! [`CastError::FrameTooLarge`]: crate::error::CastError::FrameTooLarge

pub mod fragmenter;
pub mod header;
pub mod seq;

pub use fragmenter::Fragmenter;
pub use header::FragmentHeader;
pub use seq::FrameSequence;

/// Modulus of the wrapping 8-bit frame sequence counter.
pub const SEQ_MODULUS: u16 = 256;

/// Ceiling on the number of fragments per frame (8-bit count field).
pub const MAX_FRAGMENTS_PER_FRAME: usize = 255;

/// Header length when the latency probe timestamp is carried.
pub const PROBED_HEADER_LEN: usize = 11;

/// Header length without the probe timestamp.
pub const BARE_HEADER_LEN: usize = 3;

/// Default maximum compressed-frame bytes per fragment, comfortably below
/// the 65 507-byte UDP payload limit.
pub const DEFAULT_MAX_PAYLOAD: usize = 60_000;

/// Default destination port.
pub const DEFAULT_PORT: u16 = 9999;

/// Wire layout variant, fixed per deployment.
///
/// Both endpoints must be configured with the same variant out-of-band;
/// the header carries no discriminator. Keeping the choice in the data
/// model (rather than a compile-time flag) makes the two layouts explicit
/// and testable side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVariant {
    /// 11-byte header: 8-byte capture timestamp + seq/index/count.
    WithTimestamp,
    /// 3-byte header: seq/index/count only.
    WithoutTimestamp,
}

impl ProtocolVariant {
    /// Fixed header length for this layout.
    pub fn header_len(self) -> usize {
        match self {
            Self::WithTimestamp => PROBED_HEADER_LEN,
            Self::WithoutTimestamp => BARE_HEADER_LEN,
        }
    }

    /// Whether fragments of this layout carry a capture timestamp.
    pub fn carries_timestamp(self) -> bool {
        matches!(self, Self::WithTimestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lengths() {
        assert_eq!(ProtocolVariant::WithTimestamp.header_len(), 11);
        assert_eq!(ProtocolVariant::WithoutTimestamp.header_len(), 3);
    }

    #[test]
    fn timestamp_presence() {
        assert!(ProtocolVariant::WithTimestamp.carries_timestamp());
        assert!(!ProtocolVariant::WithoutTimestamp.carries_timestamp());
    }
}
