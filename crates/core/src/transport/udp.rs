use std::net::{SocketAddr, UdpSocket};

use crate::error::Result;

/// UDP transport for outbound fragment delivery.
///
/// Binds a single ephemeral socket (`0.0.0.0:0`) and fires framed fragments
/// at a destination resolved once by the caller. This layer is deliberately
/// address-only — it knows nothing about frames, sequences, or pacing.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind an ephemeral UDP socket for outbound fragments.
    ///
    /// Bind failure is fatal: it indicates misconfiguration, not transient
    /// loss, so no retry is attempted.
    pub fn bind() -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self { socket })
    }

    /// Send raw bytes to a specific socket address, best-effort.
    pub fn send_to(&self, payload: &[u8], addr: SocketAddr) -> Result<usize> {
        Ok(self.socket.send_to(payload, addr)?)
    }

    /// Local address of the bound socket (useful in tests).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_and_send_loopback() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let dest = receiver.local_addr().unwrap();

        let transport = UdpTransport::bind().unwrap();
        let sent = transport.send_to(b"hello", dest).unwrap();
        assert_eq!(sent, 5);

        let mut buf = [0u8; 16];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello");
    }
}
