//! Error types for the framecast library.

use std::fmt;

/// Errors that can occur in the framecast library.
///
/// Variants map to specific failure modes across the stack:
///
/// - **Protocol**: [`FrameTooLarge`](Self::FrameTooLarge),
///   [`MalformedHeader`](Self::MalformedHeader),
///   [`ProbeMismatch`](Self::ProbeMismatch).
/// - **Configuration**: [`InvalidMaxPayload`](Self::InvalidMaxPayload).
/// - **Transport**: [`Io`](Self::Io) — socket failures at startup.
/// - **Media**: [`Encode`](Self::Encode) — JPEG compression failures.
///
/// An empty compressed frame is *not* an error: it produces no fragments
/// and no datagrams, but the caller still advances the frame sequence.
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    /// Underlying I/O or socket error. Fatal when binding the transport at
    /// startup; in-flight send failures are logged and dropped instead,
    /// matching the fire-and-forget wire.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compressed frame would need more than
    /// [`MAX_FRAGMENTS_PER_FRAME`](crate::protocol::MAX_FRAGMENTS_PER_FRAME)
    /// fragments at the configured payload size. The frame is dropped whole,
    /// never truncated.
    #[error("frame needs {fragments} fragments of {max_payload} bytes (limit 255)")]
    FrameTooLarge {
        fragments: usize,
        max_payload: usize,
    },

    /// A received datagram cannot hold a valid fragment header.
    #[error("malformed fragment header: {kind}")]
    MalformedHeader { kind: HeaderErrorKind },

    /// Timestamp presence disagrees with the configured
    /// [`ProtocolVariant`](crate::protocol::ProtocolVariant). Both wire ends
    /// must agree on the variant out-of-band; a mismatch is a configuration
    /// error, never silently tolerated.
    #[error("latency probe mismatch (variant expects timestamp: {variant_expects_timestamp})")]
    ProbeMismatch { variant_expects_timestamp: bool },

    /// Fragmenter configured with a zero maximum payload size.
    #[error("max payload size must be greater than zero")]
    InvalidMaxPayload,

    /// Frame compression failed.
    #[error("frame encode error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Specific kind of fragment header decode failure.
#[derive(Debug, PartialEq, Eq)]
pub enum HeaderErrorKind {
    /// Datagram has fewer bytes than the variant's header length.
    Truncated,
    /// Fragment count byte was zero (a framed datagram always belongs to
    /// at least one fragment).
    ZeroFragmentCount,
    /// Fragment index is not below the fragment count.
    IndexBeyondCount,
    /// Decoded capture timestamp is not a finite value.
    NonFiniteTimestamp,
}

impl fmt::Display for HeaderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "datagram shorter than header"),
            Self::ZeroFragmentCount => write!(f, "fragment count is zero"),
            Self::IndexBeyondCount => write!(f, "fragment index beyond count"),
            Self::NonFiniteTimestamp => write!(f, "timestamp is not finite"),
        }
    }
}

/// Convenience alias for `Result<T, CastError>`.
pub type Result<T> = std::result::Result<T, CastError>;
