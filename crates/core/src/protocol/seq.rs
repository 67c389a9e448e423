/// Wrapping 8-bit frame sequence counter.
///
/// One value per compressed frame, advanced after the frame is dispatched
/// (or skipped — empty and oversize frames advance the counter too, so a
/// receiver sees a gap instead of a stale sequence reused for unrelated
/// fragments). Wraps from 255 back to 0; consecutive frames differ by
/// exactly 1 modulo [`SEQ_MODULUS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameSequence {
    current: u8,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next frame will carry.
    pub fn current(&self) -> u8 {
        self.current
    }

    /// Return the current value and step to the next, wrapping mod 256.
    pub fn advance(&mut self) -> u8 {
        let seq = self.current;
        self.current = self.current.wrapping_add(1);
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::super::SEQ_MODULUS;
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(FrameSequence::new().current(), 0);
    }

    #[test]
    fn advance_returns_pre_increment_value() {
        let mut seq = FrameSequence::new();
        assert_eq!(seq.advance(), 0);
        assert_eq!(seq.advance(), 1);
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn wraps_after_modulus_steps() {
        let mut seq = FrameSequence::new();
        for _ in 0..SEQ_MODULUS {
            seq.advance();
        }
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn wraps_255_to_0() {
        let mut seq = FrameSequence::new();
        for _ in 0..255 {
            seq.advance();
        }
        assert_eq!(seq.current(), 255);
        assert_eq!(seq.advance(), 255);
        assert_eq!(seq.current(), 0);
    }
}
