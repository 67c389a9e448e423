//! Frame acquisition and compression seams.
//!
//! The caster treats the camera and the codec as narrow collaborators:
//! a [`FrameSource`] hands over raw RGB frames, a [`FrameEncoder`] turns
//! one raw frame into a compact byte sequence. The fragmentation protocol
//! never looks inside either — a compressed frame is an opaque byte slice
//! by the time it reaches the [`Fragmenter`](crate::protocol::Fragmenter).
//!
//! The shipped encoder is [`jpeg::JpegFrameEncoder`]. Real capture
//! pipelines (V4L2, GStreamer, screen grabbers) plug in behind
//! [`FrameSource`] without touching the protocol layer.

pub mod jpeg;

use crate::error::Result;

/// One uncompressed frame: tightly packed RGB24 pixels.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes, row-major RGB.
    pub pixels: Vec<u8>,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Produces raw frames at the capture rate.
///
/// `Ok(None)` means no frame was available this cycle — the driver yields
/// briefly and retries without advancing the frame sequence.
pub trait FrameSource: Send {
    fn capture_next(&mut self) -> Result<Option<RawFrame>>;
}

/// Compresses one raw frame into an opaque byte sequence.
///
/// Deterministic for a fixed quality setting. Output length may be zero in
/// degenerate cases; the caster treats that as "nothing to send".
pub trait FrameEncoder: Send {
    fn compress(&self, frame: &RawFrame) -> Result<Vec<u8>>;
}
