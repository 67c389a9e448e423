use std::io::Cursor;

use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

use crate::error::Result;

use super::{FrameEncoder, RawFrame};

/// Default JPEG quality: a workable balance between image quality and
/// per-frame latency on a LAN.
pub const DEFAULT_JPEG_QUALITY: u8 = 60;

/// Lossy JPEG frame encoder backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct JpegFrameEncoder {
    quality: u8,
}

impl JpegFrameEncoder {
    /// Create an encoder with an explicit quality in 1..=100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegFrameEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl FrameEncoder for JpegFrameEncoder {
    fn compress(&self, frame: &RawFrame) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        let mut encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        encoder.encode(
            &frame.pixels,
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        )?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> RawFrame {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        RawFrame::new(width, height, pixels)
    }

    #[test]
    fn produces_jpeg_magic() {
        let frame = solid_frame(64, 48, [200, 30, 30]);
        let jpeg = JpegFrameEncoder::default().compress(&frame).unwrap();
        assert!(jpeg.len() > 4);
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]); // SOI
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]); // EOI
    }

    #[test]
    fn deterministic_for_fixed_quality() {
        let frame = solid_frame(32, 32, [10, 120, 240]);
        let enc = JpegFrameEncoder::new(60);
        assert_eq!(enc.compress(&frame).unwrap(), enc.compress(&frame).unwrap());
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(JpegFrameEncoder::new(0).quality(), 1);
        assert_eq!(JpegFrameEncoder::new(255).quality(), 100);
    }
}
