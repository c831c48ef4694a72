//! Per-interface multicast UDP sockets.
//!
//! [`MulticastSocket`] builds a socket the rest of the crate can drive
//! without blocking: bound to one local interface address with an ephemeral
//! source port, joined to the mDNS group of that interface's family, TTL 1,
//! multicast loopback on. [`MdnsSocket`] is the opened socket plus the
//! multicast destination derived from its bound family.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

use shared::error::{Error, Result};

/// The IPv4 mDNS multicast group (224.0.0.251).
pub const MDNS_MULTICAST_IPV4: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);

/// The IPv6 mDNS multicast group (ff02::fb).
pub const MDNS_MULTICAST_IPV6: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb);

/// The standard mDNS port (5353).
pub const MDNS_PORT: u16 = 5353;

/// A builder for per-interface multicast UDP sockets.
///
/// The resulting socket is:
///
/// - bound to `(interface, 0)` so the OS assigns an ephemeral source port;
///   a dedicated socket per interface avoids contending for port 5353
/// - non-blocking
/// - TTL / hop limit 1, keeping queries on the local link
/// - multicast loopback enabled, so a host can observe its own queries
/// - joined to the mDNS group matching the interface's address family
#[derive(Debug, Clone)]
pub struct MulticastSocket {
    ttl: u32,
    loopback: bool,
}

impl Default for MulticastSocket {
    fn default() -> Self {
        Self::new()
    }
}

impl MulticastSocket {
    pub fn new() -> Self {
        MulticastSocket {
            ttl: 1,
            loopback: true,
        }
    }

    /// Overrides the multicast TTL / hop limit.
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enables or disables multicast loopback.
    pub fn with_loopback(mut self, loopback: bool) -> Self {
        self.loopback = loopback;
        self
    }

    /// Opens a socket bound to `interface` and joined to the matching
    /// multicast group. Any failure along the way closes the half-built
    /// socket and reports [`Error::ErrOpeningSocket`].
    pub fn open(self, interface: IpAddr) -> Result<MdnsSocket> {
        self.open_inner(interface).map_err(|err| {
            log::warn!("failed to open multicast socket on {interface}: {err}");
            Error::ErrOpeningSocket
        })
    }

    fn open_inner(self, interface: IpAddr) -> io::Result<MdnsSocket> {
        let domain = if interface.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };
        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_nonblocking(true)?;
        socket.bind(&SocketAddr::new(interface, 0).into())?;

        match interface {
            IpAddr::V4(ip) => {
                socket.set_multicast_ttl_v4(self.ttl)?;
                socket.set_multicast_loop_v4(self.loopback)?;
                // Take group membership on the bound interface when we have
                // a concrete address; otherwise let the OS pick.
                let membership = if ip.is_unspecified() {
                    Ipv4Addr::UNSPECIFIED
                } else {
                    ip
                };
                socket.join_multicast_v4(&MDNS_MULTICAST_IPV4, &membership)?;
            }
            IpAddr::V6(_) => {
                socket.set_multicast_hops_v6(self.ttl)?;
                socket.set_multicast_loop_v6(self.loopback)?;
                socket.join_multicast_v6(&MDNS_MULTICAST_IPV6, 0)?;
            }
        }

        let inner: UdpSocket = socket.into();
        // The multicast destination follows the bound family.
        let dest = if inner.local_addr()?.is_ipv4() {
            SocketAddr::new(IpAddr::V4(MDNS_MULTICAST_IPV4), MDNS_PORT)
        } else {
            SocketAddr::new(IpAddr::V6(MDNS_MULTICAST_IPV6), MDNS_PORT)
        };

        Ok(MdnsSocket { inner, dest })
    }
}

/// An open non-blocking mDNS socket bound to one interface address.
///
/// Closing is dropping.
#[derive(Debug)]
pub struct MdnsSocket {
    inner: UdpSocket,
    dest: SocketAddr,
}

impl MdnsSocket {
    /// Multicasts `payload` to the mDNS group of the bound family. Errors,
    /// including `WouldBlock`, surface to the caller, who decides whether
    /// to retry.
    pub fn send(&self, payload: &[u8]) -> io::Result<usize> {
        self.inner.send_to(payload, self.dest)
    }

    /// Non-blocking receive. `None` means no datagram was ready; any recv
    /// error is treated the same way.
    pub fn recv(&self, buf: &mut [u8]) -> Option<(usize, SocketAddr)> {
        match self.inner.recv_from(buf) {
            Ok((0, _)) => None,
            Ok((n, src)) => Some((n, src)),
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => None,
            Err(err) => {
                log::debug!("recv error treated as no packet: {err}");
                None
            }
        }
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// The multicast destination sends go to.
    pub fn multicast_dest(&self) -> SocketAddr {
        self.dest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multicast_constants() {
        assert_eq!(MDNS_MULTICAST_IPV4, Ipv4Addr::new(224, 0, 0, 251));
        assert_eq!(
            MDNS_MULTICAST_IPV6.to_string(),
            "ff02::fb".to_string()
        );
        assert_eq!(MDNS_PORT, 5353);
    }

    #[test]
    fn test_builder_defaults() {
        let builder = MulticastSocket::new();
        assert_eq!(builder.ttl, 1);
        assert!(builder.loopback);

        let builder = MulticastSocket::new().with_ttl(4).with_loopback(false);
        assert_eq!(builder.ttl, 4);
        assert!(!builder.loopback);
    }

    // Socket creation tests live with the performer and stay tolerant of
    // sandboxed environments without multicast routing.
}
