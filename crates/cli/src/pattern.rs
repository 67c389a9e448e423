//! Synthetic frame source: a moving gradient with per-frame noise.
//!
//! Stands in for a camera so the sender can run anywhere. A real capture
//! pipeline (V4L2, GStreamer, screen grabber) plugs in behind the same
//! [`FrameSource`] trait.

use std::time::{Duration, Instant};

use framecast::{FrameSource, RawFrame, Result};
use rand::RngExt;

/// Generates frames at a fixed rate; between frame intervals,
/// `capture_next` yields `None` like a camera with no buffer ready.
pub struct TestPatternSource {
    width: u32,
    height: u32,
    interval: Duration,
    next_due: Instant,
    phase: u8,
    noise_seed: u8,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        let interval = Duration::from_secs(1) / fps.max(1);
        Self {
            width,
            height,
            interval,
            next_due: Instant::now(),
            phase: 0,
            noise_seed: rand::rng().random(),
        }
    }

    fn render(&self) -> RawFrame {
        let mut pixels = Vec::with_capacity((self.width * self.height * 3) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push((x as u8).wrapping_add(self.phase));
                pixels.push((y as u8).wrapping_sub(self.phase));
                pixels.push(self.phase.wrapping_mul(2) ^ self.noise_seed);
            }
        }
        RawFrame::new(self.width, self.height, pixels)
    }
}

impl FrameSource for TestPatternSource {
    fn capture_next(&mut self) -> Result<Option<RawFrame>> {
        if Instant::now() < self.next_due {
            return Ok(None);
        }
        self.next_due += self.interval;
        self.phase = self.phase.wrapping_add(1);
        Ok(Some(self.render()))
    }
}
