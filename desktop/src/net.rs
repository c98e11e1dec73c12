//! Fire-and-forget UDP senders. Nothing here is acknowledged, ordered or
//! retried; a failed send is logged and the frame loop carries on.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use anyhow::{Context, Result};
use game_core::{FrameView, RenderSink};
use proto::{HandDatagram, Snapshot};
use tracing::{debug, warn};

/// Datagram socket aimed at one target with `send_to` (never `connect`ed);
/// counts what it could not deliver
pub struct DatagramLink {
    socket: UdpSocket,
    target: SocketAddr,
    pub sent: u64,
    pub dropped: u64,
}

impl DatagramLink {
    pub fn connect(target: SocketAddr) -> Result<Self> {
        let bind_addr = if target.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(bind_addr)
            .with_context(|| format!("failed to bind UDP socket for {target}"))?;
        socket
            .set_nonblocking(true)
            .context("failed to make UDP socket non-blocking")?;
        Ok(Self {
            socket,
            target,
            sent: 0,
            dropped: 0,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr().ok()
    }

    /// Send one datagram; failures are logged, never returned
    pub fn send(&mut self, bytes: &[u8]) {
        match self.socket.send_to(bytes, self.target) {
            Ok(_) => self.sent += 1,
            Err(e) => {
                self.dropped += 1;
                // Log the first failure loudly, then only every hundredth
                if self.dropped == 1 || self.dropped % 100 == 0 {
                    warn!(target_addr = %self.target, dropped = self.dropped, "datagram send failed: {e}");
                } else {
                    debug!("datagram send failed: {e}");
                }
            }
        }
    }
}

/// Streams one [`HandDatagram`] per processed frame
pub struct TelemetrySender {
    link: DatagramLink,
}

impl TelemetrySender {
    pub fn connect(target: SocketAddr) -> Result<Self> {
        Ok(Self {
            link: DatagramLink::connect(target)?,
        })
    }

    pub fn send(&mut self, datagram: &HandDatagram) {
        self.link.send(&datagram.to_bytes());
    }

    pub fn link(&self) -> &DatagramLink {
        &self.link
    }
}

/// Publishes every rendered frame as a postcard [`Snapshot`]
pub struct SnapshotPublisher {
    link: DatagramLink,
}

impl SnapshotPublisher {
    pub fn connect(target: SocketAddr) -> Result<Self> {
        Ok(Self {
            link: DatagramLink::connect(target)?,
        })
    }

    pub fn link(&self) -> &DatagramLink {
        &self.link
    }
}

/// Convert a core frame into its wire form
pub fn to_snapshot(frame: &FrameView) -> Snapshot {
    Snapshot {
        tick: frame.tick,
        body: frame.body.iter().map(|p| (p.x, p.y)).collect(),
        food: (frame.food.x, frame.food.y),
        score: frame.score,
        game_over: frame.game_over,
    }
}

impl RenderSink for SnapshotPublisher {
    fn present(&mut self, frame: &FrameView) {
        match to_snapshot(frame).to_bytes() {
            Ok(bytes) => self.link.send(&bytes),
            Err(e) => warn!("failed to encode snapshot: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use std::time::Duration;

    fn receiver() -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set timeout");
        socket
    }

    #[test]
    fn test_telemetry_datagram_arrives() {
        let rx = receiver();
        let mut sender = TelemetrySender::connect(rx.local_addr().unwrap()).unwrap();
        sender.send(&HandDatagram::new(0.25, 2));

        let mut buf = [0u8; 64];
        let (len, _) = rx.recv_from(&mut buf).expect("datagram");
        assert_eq!(len, 8);
        let decoded = HandDatagram::from_bytes(&buf[..len]).unwrap();
        assert_eq!(decoded, HandDatagram::new(0.25, 2));
        assert_eq!(sender.link().sent, 1);
    }

    #[test]
    fn test_snapshot_published() {
        let rx = receiver();
        let mut publisher = SnapshotPublisher::connect(rx.local_addr().unwrap()).unwrap();
        let frame = FrameView {
            body: vec![IVec2::new(400, 280)],
            food: IVec2::new(0, 20),
            score: 3,
            game_over: true,
            tick: 9,
        };
        publisher.present(&frame);

        let mut buf = [0u8; 1024];
        let (len, _) = rx.recv_from(&mut buf).expect("datagram");
        let snapshot = Snapshot::from_bytes(&buf[..len]).unwrap();
        assert_eq!(snapshot, to_snapshot(&frame));
        assert!(snapshot.game_over);
    }

    #[test]
    fn test_to_snapshot() {
        let frame = FrameView {
            body: vec![IVec2::new(20, 40), IVec2::new(20, 60)],
            food: IVec2::new(100, 0),
            score: 1,
            game_over: false,
            tick: 2,
        };
        let snapshot = to_snapshot(&frame);
        assert_eq!(snapshot.body, vec![(20, 40), (20, 60)]);
        assert_eq!(snapshot.food, (100, 0));
    }
}
