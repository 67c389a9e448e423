use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::error::{CastError, Result};
use crate::media::{FrameEncoder, FrameSource};
use crate::pacing::PacingPolicy;
use crate::protocol::{DEFAULT_MAX_PAYLOAD, Fragmenter, FrameSequence, ProtocolVariant};
use crate::transport::UdpTransport;

/// Default pause before retrying when the source yields no frame.
pub const DEFAULT_IDLE_WAIT: Duration = Duration::from_millis(1);

/// Caster configuration: where fragments go and how they are framed.
#[derive(Debug, Clone)]
pub struct CasterConfig {
    /// Destination address, resolved once at startup.
    pub dest: SocketAddr,
    /// Wire layout shared with the receiving end.
    pub variant: ProtocolVariant,
    /// Compressed-frame bytes per fragment (header excluded).
    pub max_payload: usize,
    /// Pause between consecutive fragment sends.
    pub pacing: PacingPolicy,
    /// Pause before retrying an empty capture cycle.
    pub idle_wait: Duration,
}

impl CasterConfig {
    /// Defaults: latency probe on, 60 000-byte payloads, 150 µs pacing.
    pub fn new(dest: SocketAddr) -> Self {
        Self {
            dest,
            variant: ProtocolVariant::WithTimestamp,
            max_payload: DEFAULT_MAX_PAYLOAD,
            pacing: PacingPolicy::default(),
            idle_wait: DEFAULT_IDLE_WAIT,
        }
    }
}

/// Counters exposed so dropped and skipped frames stay observable — an
/// oversize drop must never be silent.
#[derive(Debug, Default, Clone, Copy)]
pub struct CastStats {
    pub frames_sent: u64,
    pub fragments_sent: u64,
    pub bytes_sent: u64,
    pub frames_skipped_empty: u64,
    pub frames_dropped_oversize: u64,
}

/// Requests a running [`Caster::run`] loop to stop from another thread.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives the per-frame pipeline: capture → encode → fragment → send.
///
/// Owns the only mutable cross-frame state in the system — the frame
/// sequence counter — plus the transport socket and the pacing policy.
/// Fragmentation itself stays a pure transform inside [`Fragmenter`].
pub struct Caster {
    dest: SocketAddr,
    fragmenter: Fragmenter,
    transport: UdpTransport,
    pacing: PacingPolicy,
    idle_wait: Duration,
    seq: FrameSequence,
    running: Arc<AtomicBool>,
    stats: Arc<RwLock<CastStats>>,
}

impl Caster {
    /// Bind the outbound socket and set up the fragmentation plan.
    ///
    /// Fails fast on a zero `max_payload` or a socket bind error — both are
    /// misconfiguration, fatal at startup by design.
    pub fn new(config: CasterConfig) -> Result<Self> {
        let fragmenter = Fragmenter::new(config.variant, config.max_payload)?;
        let transport = UdpTransport::bind()?;

        tracing::info!(
            dest = %config.dest,
            variant = ?config.variant,
            max_payload = config.max_payload,
            "caster ready"
        );

        Ok(Self {
            dest: config.dest,
            fragmenter,
            transport,
            pacing: config.pacing,
            idle_wait: config.idle_wait,
            seq: FrameSequence::new(),
            running: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(RwLock::new(CastStats::default())),
        })
    }

    /// Sequence number the next frame will carry.
    pub fn current_seq(&self) -> u8 {
        self.seq.current()
    }

    /// Snapshot of the send counters.
    pub fn stats(&self) -> CastStats {
        *self.stats.read()
    }

    /// Handle for stopping a [`run`](Self::run) loop from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Fragment one compressed frame and fire its datagrams at the
    /// destination. Returns the number of datagrams handed to the socket.
    ///
    /// The frame sequence advances on every outcome — sent, skipped empty,
    /// or dropped oversize — so downstream sequencing never observes a
    /// reused number. Individual send failures are logged and swallowed:
    /// the wire is fire-and-forget and datagram loss is expected.
    pub fn cast_frame(&mut self, encoded: &[u8]) -> Result<usize> {
        let timestamp = self
            .fragmenter
            .variant()
            .carries_timestamp()
            .then(unix_timestamp);
        let seq = self.seq.current();

        let datagrams = match self.fragmenter.fragment(encoded, seq, timestamp) {
            Ok(d) => d,
            Err(err @ CastError::FrameTooLarge { .. }) => {
                // Drop whole, advance anyway: a receiver sees a sequence gap
                // rather than fragments of unrelated frames sharing a number.
                self.seq.advance();
                self.stats.write().frames_dropped_oversize += 1;
                tracing::warn!(seq, frame_bytes = encoded.len(), %err, "oversize frame dropped");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        if datagrams.is_empty() {
            self.seq.advance();
            self.stats.write().frames_skipped_empty += 1;
            tracing::debug!(seq, "empty compressed frame skipped");
            return Ok(0);
        }

        let mut sent = 0usize;
        let mut bytes = 0u64;
        for datagram in &datagrams {
            match self.transport.send_to(datagram, self.dest) {
                Ok(n) => {
                    sent += 1;
                    bytes += n as u64;
                }
                Err(err) => {
                    tracing::debug!(seq, %err, "fragment send failed, dropping");
                }
            }
            self.pacing.pause();
        }
        self.seq.advance();

        {
            let mut stats = self.stats.write();
            stats.frames_sent += 1;
            stats.fragments_sent += sent as u64;
            stats.bytes_sent += bytes;
        }

        tracing::trace!(
            seq,
            fragments = datagrams.len(),
            sent,
            frame_bytes = encoded.len(),
            "frame dispatched"
        );

        Ok(sent)
    }

    /// Run the capture → encode → fragment → send loop until stopped.
    ///
    /// Single sequential pipeline: one frame is fully dispatched before the
    /// next capture begins. An idle capture cycle sleeps briefly and
    /// retries without touching the sequence. Oversize frames are dropped
    /// and the loop continues; encoder failures abort the loop.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        encoder: &dyn FrameEncoder,
    ) -> Result<()> {
        self.running.store(true, Ordering::SeqCst);
        tracing::info!(dest = %self.dest, "cast loop started");

        while self.running.load(Ordering::SeqCst) {
            let Some(frame) = source.capture_next()? else {
                thread::sleep(self.idle_wait);
                continue;
            };

            let encoded = encoder.compress(&frame)?;
            match self.cast_frame(&encoded) {
                Ok(_) | Err(CastError::FrameTooLarge { .. }) => {}
                Err(err) => return Err(err),
            }
        }

        tracing::info!(stats = ?self.stats(), "cast loop stopped");
        Ok(())
    }
}

/// Capture instant as f64 seconds since the UNIX epoch, matching the
/// 8-byte probe field on the wire.
fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
