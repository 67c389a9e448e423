use crate::error::{CastError, Result};

use super::header::FragmentHeader;
use super::{MAX_FRAGMENTS_PER_FRAME, ProtocolVariant};

/// Fragmentation planner: slices one compressed frame into framed,
/// ready-to-send datagrams.
///
/// The fragmenter is a pure transform. It holds only configuration (wire
/// variant and payload ceiling) — the frame sequence counter and the capture
/// timestamp are owned by the caller and passed in per frame, which keeps
/// fragmentation stateless and independently testable.
#[derive(Debug, Clone, Copy)]
pub struct Fragmenter {
    variant: ProtocolVariant,
    max_payload: usize,
}

impl Fragmenter {
    /// Create a fragmenter for the given wire variant and payload ceiling.
    ///
    /// `max_payload` caps the compressed-frame bytes per datagram (header
    /// excluded) and must be non-zero.
    pub fn new(variant: ProtocolVariant, max_payload: usize) -> Result<Self> {
        if max_payload == 0 {
            return Err(CastError::InvalidMaxPayload);
        }
        Ok(Self {
            variant,
            max_payload,
        })
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Split `frame` into framed datagrams carrying `seq` and, when the
    /// variant requires it, `timestamp` (identical across every fragment of
    /// the frame).
    ///
    /// - An empty frame yields an empty plan: nothing to send. Advancing the
    ///   sequence for the skipped frame is the caller's job.
    /// - A frame needing more than 255 fragments fails with
    ///   [`CastError::FrameTooLarge`] and yields no fragments — the 8-bit
    ///   count field cannot represent it, and truncating would corrupt the
    ///   stream silently.
    /// - `timestamp` presence must match the variant; disagreement is a
    ///   configuration error ([`CastError::ProbeMismatch`]).
    ///
    /// Concatenating the payloads of the returned datagrams in index order
    /// reproduces `frame` byte-for-byte, and every datagram is at most
    /// `max_payload + header_len` bytes.
    pub fn fragment(&self, frame: &[u8], seq: u8, timestamp: Option<f64>) -> Result<Vec<Vec<u8>>> {
        if timestamp.is_some() != self.variant.carries_timestamp() {
            return Err(CastError::ProbeMismatch {
                variant_expects_timestamp: self.variant.carries_timestamp(),
            });
        }
        if let Some(ts) = timestamp
            && !ts.is_finite()
        {
            return Err(CastError::ProbeMismatch {
                variant_expects_timestamp: true,
            });
        }

        if frame.is_empty() {
            return Ok(Vec::new());
        }

        let fragment_count = frame.len().div_ceil(self.max_payload);
        if fragment_count > MAX_FRAGMENTS_PER_FRAME {
            return Err(CastError::FrameTooLarge {
                fragments: fragment_count,
                max_payload: self.max_payload,
            });
        }

        let header_len = self.variant.header_len();
        let mut datagrams = Vec::with_capacity(fragment_count);

        for index in 0..fragment_count {
            let start = index * self.max_payload;
            let end = usize::min(start + self.max_payload, frame.len());
            let chunk = &frame[start..end];

            let header = FragmentHeader {
                timestamp,
                frame_seq: seq,
                fragment_index: index as u8,
                fragment_count: fragment_count as u8,
            };

            let mut datagram = Vec::with_capacity(header_len + chunk.len());
            header.write_to(&mut datagram);
            datagram.extend_from_slice(chunk);
            datagrams.push(datagram);
        }

        tracing::trace!(
            seq,
            fragments = fragment_count,
            frame_bytes = frame.len(),
            "frame fragmented"
        );

        Ok(datagrams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(max_payload: usize) -> Fragmenter {
        Fragmenter::new(ProtocolVariant::WithoutTimestamp, max_payload).unwrap()
    }

    fn probed(max_payload: usize) -> Fragmenter {
        Fragmenter::new(ProtocolVariant::WithTimestamp, max_payload).unwrap()
    }

    fn reassemble(datagrams: &[Vec<u8>], variant: ProtocolVariant) -> Vec<u8> {
        let mut out = Vec::new();
        for d in datagrams {
            let (_, payload) = FragmentHeader::decode(d, variant).unwrap();
            out.extend_from_slice(payload);
        }
        out
    }

    #[test]
    fn zero_max_payload_rejected() {
        assert!(matches!(
            Fragmenter::new(ProtocolVariant::WithoutTimestamp, 0),
            Err(CastError::InvalidMaxPayload)
        ));
    }

    #[test]
    fn empty_frame_yields_no_fragments() {
        let f = bare(60_000);
        assert!(f.fragment(&[], 9, None).unwrap().is_empty());
    }

    #[test]
    fn round_trip_reassembly() {
        let frame: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let f = bare(1400);
        let datagrams = f.fragment(&frame, 3, None).unwrap();
        assert_eq!(
            reassemble(&datagrams, ProtocolVariant::WithoutTimestamp),
            frame
        );
    }

    #[test]
    fn three_fragment_plan_150k_over_60k() {
        let frame = vec![0xABu8; 150_000];
        let f = probed(60_000);
        let datagrams = f.fragment(&frame, 0, Some(1.0)).unwrap();

        assert_eq!(datagrams.len(), 3);
        let mut lens = Vec::new();
        for (i, d) in datagrams.iter().enumerate() {
            let (h, payload) = FragmentHeader::decode(d, ProtocolVariant::WithTimestamp).unwrap();
            assert_eq!(h.fragment_index as usize, i);
            assert_eq!(h.fragment_count, 3);
            lens.push(payload.len());
        }
        assert_eq!(lens, vec![60_000, 60_000, 30_000]);
    }

    #[test]
    fn every_datagram_within_bound() {
        let frame = vec![7u8; 4_321];
        let f = probed(1000);
        for d in f.fragment(&frame, 1, Some(2.5)).unwrap() {
            assert!(d.len() <= 1000 + ProtocolVariant::WithTimestamp.header_len());
        }
    }

    #[test]
    fn count_matches_plan_length() {
        let frame = vec![1u8; 5_500];
        let f = bare(1000);
        let datagrams = f.fragment(&frame, 0, None).unwrap();
        assert_eq!(datagrams.len(), 6);
        for d in &datagrams {
            let (h, _) = FragmentHeader::decode(d, ProtocolVariant::WithoutTimestamp).unwrap();
            assert_eq!(h.fragment_count as usize, datagrams.len());
        }
    }

    #[test]
    fn timestamp_identical_across_fragments() {
        let frame = vec![0u8; 3_000];
        let f = probed(1000);
        let ts = 1_699_999_999.875;
        for d in f.fragment(&frame, 5, Some(ts)).unwrap() {
            let (h, _) = FragmentHeader::decode(&d, ProtocolVariant::WithTimestamp).unwrap();
            assert_eq!(h.timestamp, Some(ts));
            assert_eq!(h.frame_seq, 5);
        }
    }

    #[test]
    fn single_small_frame_without_probe() {
        // 10-byte frame, probe disabled: one 13-byte datagram (3 B header).
        let f = bare(60_000);
        let datagrams = f.fragment(&[0x11; 10], 8, None).unwrap();
        assert_eq!(datagrams.len(), 1);
        assert_eq!(datagrams[0].len(), 13);
        assert_eq!(&datagrams[0][..3], &[8, 0, 1]);
    }

    #[test]
    fn oversize_frame_rejected() {
        // 256 fragments at 100 B/fragment — one past the 8-bit ceiling.
        let frame = vec![0u8; 100 * 255 + 1];
        let f = bare(100);
        match f.fragment(&frame, 0, None) {
            Err(CastError::FrameTooLarge {
                fragments,
                max_payload,
            }) => {
                assert_eq!(fragments, 256);
                assert_eq!(max_payload, 100);
            }
            other => panic!("expected FrameTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn exactly_255_fragments_allowed() {
        let frame = vec![0u8; 100 * 255];
        let f = bare(100);
        let datagrams = f.fragment(&frame, 0, None).unwrap();
        assert_eq!(datagrams.len(), 255);
        let (h, _) =
            FragmentHeader::decode(datagrams.last().unwrap(), ProtocolVariant::WithoutTimestamp)
                .unwrap();
        assert_eq!(h.fragment_index, 254);
        assert_eq!(h.fragment_count, 255);
    }

    #[test]
    fn probe_mismatch_rejected_both_ways() {
        let frame = [1u8; 4];
        assert!(matches!(
            bare(100).fragment(&frame, 0, Some(1.0)),
            Err(CastError::ProbeMismatch {
                variant_expects_timestamp: false
            })
        ));
        assert!(matches!(
            probed(100).fragment(&frame, 0, None),
            Err(CastError::ProbeMismatch {
                variant_expects_timestamp: true
            })
        ));
    }

    #[test]
    fn non_finite_timestamp_rejected() {
        let f = probed(100);
        assert!(f.fragment(&[1u8; 4], 0, Some(f64::INFINITY)).is_err());
    }
}
