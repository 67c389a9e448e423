//! Network transport for outbound fragment delivery.
//!
//! Fragments travel as best-effort UDP datagrams ([`udp`]): one datagram
//! per fragment, no acknowledgement, no retransmission. Loss and
//! reordering are the receiver's problem by design — the sender is
//! open-loop.

pub mod udp;

pub use udp::UdpTransport;
