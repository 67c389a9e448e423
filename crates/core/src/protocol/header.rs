use crate::error::{CastError, HeaderErrorKind, Result};

use super::ProtocolVariant;

/// Decoded form of the per-fragment header.
///
/// `timestamp` is `Some` exactly when the fragment was framed under
/// [`ProtocolVariant::WithTimestamp`]. All fragments of one frame carry the
/// same `(timestamp, frame_seq, fragment_count)` triple; only
/// `fragment_index` varies.
///
/// The timestamp is serialized as the raw 8 bytes of an `f64` in **native
/// byte order** — the probing consumer reads it back with the same memcpy
/// semantics, so byte order is a compatibility contract between the two
/// ends, agreed out-of-band like the variant itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentHeader {
    /// Capture instant, seconds since the UNIX epoch. Present iff the
    /// latency probe is enabled.
    pub timestamp: Option<f64>,
    /// Wrapping per-frame sequence number.
    pub frame_seq: u8,
    /// 0-based index of this fragment within its frame.
    pub fragment_index: u8,
    /// Total fragments in this frame, 1..=255.
    pub fragment_count: u8,
}

impl FragmentHeader {
    /// Layout this header serializes under, derived from timestamp presence.
    pub fn variant(&self) -> ProtocolVariant {
        if self.timestamp.is_some() {
            ProtocolVariant::WithTimestamp
        } else {
            ProtocolVariant::WithoutTimestamp
        }
    }

    /// Append the serialized header to `buf`.
    ///
    /// Layout: `[timestamp 8 B, when present] [frame_seq] [fragment_index]
    /// [fragment_count]`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        if let Some(ts) = self.timestamp {
            buf.extend_from_slice(&ts.to_ne_bytes());
        }
        buf.push(self.frame_seq);
        buf.push(self.fragment_index);
        buf.push(self.fragment_count);
    }

    /// Serialize the header into a fresh buffer.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.variant().header_len());
        self.write_to(&mut buf);
        buf
    }

    /// Decode the header at the front of a received datagram, returning the
    /// header and the remaining payload slice.
    ///
    /// The transport is unreliable: truncated or corrupted datagrams can
    /// legitimately arrive, so malformed input is rejected with
    /// [`CastError::MalformedHeader`] rather than interpreted best-effort.
    pub fn decode(datagram: &[u8], variant: ProtocolVariant) -> Result<(Self, &[u8])> {
        let header_len = variant.header_len();
        if datagram.len() < header_len {
            return Err(CastError::MalformedHeader {
                kind: HeaderErrorKind::Truncated,
            });
        }

        let (timestamp, tail) = match variant {
            ProtocolVariant::WithTimestamp => {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&datagram[..8]);
                let ts = f64::from_ne_bytes(raw);
                if !ts.is_finite() {
                    return Err(CastError::MalformedHeader {
                        kind: HeaderErrorKind::NonFiniteTimestamp,
                    });
                }
                (Some(ts), &datagram[8..])
            }
            ProtocolVariant::WithoutTimestamp => (None, datagram),
        };

        let header = Self {
            timestamp,
            frame_seq: tail[0],
            fragment_index: tail[1],
            fragment_count: tail[2],
        };

        if header.fragment_count == 0 {
            return Err(CastError::MalformedHeader {
                kind: HeaderErrorKind::ZeroFragmentCount,
            });
        }
        if header.fragment_index >= header.fragment_count {
            return Err(CastError::MalformedHeader {
                kind: HeaderErrorKind::IndexBeyondCount,
            });
        }

        Ok((header, &datagram[header_len..]))
    }
}
