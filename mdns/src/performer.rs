//! The request performer: one multicast socket per local interface, driving
//! DNS-SD discovery and mDNS queries from a single thread.
//!
//! The performer never blocks. Sends go straight to the socket; receives
//! read whatever datagram the kernel already has and hand back an empty
//! [`Reply`] otherwise. Pacing — "poll this interface for ten seconds" —
//! belongs to the caller.

use std::collections::HashMap;
use std::net::IpAddr;

use bytes::BytesMut;

use crate::config::MdnsConfig;
use crate::message::{self, DnsType, Message};
use crate::reply::Reply;
use crate::socket::{MdnsSocket, MulticastSocket};
use shared::error::{Error, Result};
use shared::ifaces::{self, Interface};

/// Drives mDNS/DNS-SD requests over the host's interfaces.
///
/// Interfaces are identified by the printable form of their address
/// (`"192.168.1.4"`). Each one gets its own socket, opened lazily on the
/// first send and kept until [`close_socket`](Self::close_socket) or
/// [`close_all`](Self::close_all); re-opening an open interface is a no-op.
/// A single scratch buffer is reused across every receive.
///
/// One performer is single-threaded by design. Independent performers do
/// not share anything, including their transaction id sequences.
///
/// # Example
///
/// ```no_run
/// use mdns::{DnsType, RequestPerformer};
///
/// fn main() -> Result<(), shared::error::Error> {
///     let mut performer = RequestPerformer::new()?;
///     for interface in performer.list_ipv4_interfaces() {
///         performer.discovery_send(&interface)?;
///         let reply = performer.discovery_recv(&interface);
///         if !reply.is_empty() {
///             println!("{}: {} records", reply.from_address, reply.record_count());
///         }
///         performer.query_send(&interface, DnsType::Ptr, "_http._tcp.local.")?;
///     }
///     performer.close_all();
///     Ok(())
/// }
/// ```
pub struct RequestPerformer {
    config: MdnsConfig,
    interfaces: HashMap<String, IpAddr>,
    sockets: HashMap<String, MdnsSocket>,
    buffer: BytesMut,
    transaction_id: u16,
}

impl RequestPerformer {
    /// Creates a performer over every local interface address the OS
    /// reports. No sockets are opened yet.
    pub fn new() -> Result<Self> {
        Self::with_config(MdnsConfig::default())
    }

    /// As [`new`](Self::new), with explicit configuration.
    pub fn with_config(config: MdnsConfig) -> Result<Self> {
        let interfaces = ifaces::ifaces()?;
        Ok(Self::from_interfaces(config, interfaces))
    }

    /// Creates a performer over an explicit interface list, bypassing OS
    /// enumeration. This is the seam tests and embedders use.
    pub fn from_interfaces(config: MdnsConfig, interfaces: Vec<Interface>) -> Self {
        let interfaces = interfaces
            .into_iter()
            .map(|iface| (iface.addr.to_string(), iface.addr))
            .collect();
        let buffer = BytesMut::zeroed(config.capacity);
        RequestPerformer {
            config,
            interfaces,
            sockets: HashMap::new(),
            buffer,
            transaction_id: 0,
        }
    }

    /// The printable IPv4 interface addresses known to this performer.
    pub fn list_ipv4_interfaces(&self) -> Vec<String> {
        self.list_interfaces(|addr| addr.is_ipv4())
    }

    /// The printable IPv6 interface addresses known to this performer.
    pub fn list_ipv6_interfaces(&self) -> Vec<String> {
        self.list_interfaces(|addr| addr.is_ipv6())
    }

    fn list_interfaces(&self, family: impl Fn(&IpAddr) -> bool) -> Vec<String> {
        self.interfaces
            .iter()
            .filter(|(_, addr)| family(addr))
            .map(|(printable, _)| printable.clone())
            .collect()
    }

    /// Opens the multicast socket for `interface_addr` if it is not open
    /// yet; opening an already-open interface succeeds without touching it.
    pub fn open_socket(&mut self, interface_addr: &str) -> Result<()> {
        if self.sockets.contains_key(interface_addr) {
            return Ok(());
        }
        let addr = *self
            .interfaces
            .get(interface_addr)
            .ok_or(Error::ErrUnknownInterface)?;
        let socket = MulticastSocket::new().open(addr)?;
        log::debug!("opened mdns socket on {interface_addr}");
        self.sockets.insert(interface_addr.to_owned(), socket);
        Ok(())
    }

    /// Multicasts the DNS-SD service enumeration question on one
    /// interface, opening its socket first if needed.
    pub fn discovery_send(&mut self, interface_addr: &str) -> Result<()> {
        self.open_socket(interface_addr)?;
        let packet = message::build_discovery_query().map_err(|err| {
            log::warn!("failed to build discovery packet: {err}");
            Error::ErrSendingDiscovery
        })?;
        self.send_packet(interface_addr, &packet, Error::ErrSendingDiscovery)
    }

    /// Receives one pending discovery reply, if any. An empty [`Reply`]
    /// means no datagram was ready, or the datagram was not an
    /// authoritative answer to the service enumeration question.
    pub fn discovery_recv(&mut self, interface_addr: &str) -> Reply {
        self.recv_reply(interface_addr, |msg, strict, _| {
            Message::unpack_discovery(msg, strict)
        })
    }

    /// Multicasts one question for `(typ, name)` with the QU bit set,
    /// opening the interface's socket first if needed. The transaction id
    /// is advanced on every call; [`query_recv`](Self::query_recv) only
    /// accepts replies carrying the most recent one.
    pub fn query_send(&mut self, interface_addr: &str, typ: DnsType, name: &str) -> Result<()> {
        if self.config.capacity < 17 + name.len() {
            log::warn!("query name {name:?} does not fit a {} byte buffer", self.config.capacity);
            return Err(Error::ErrSendingQuery);
        }
        self.open_socket(interface_addr)?;
        self.transaction_id = self.transaction_id.wrapping_add(1);
        let packet = message::build_query(self.transaction_id, typ, name).map_err(|err| {
            log::warn!("failed to build query for {name:?}: {err}");
            Error::ErrSendingQuery
        })?;
        self.send_packet(interface_addr, &packet, Error::ErrSendingQuery)
    }

    /// Receives one pending reply to the last query, if any. An empty
    /// [`Reply`] means no datagram was ready or its transaction id did not
    /// match the last send.
    pub fn query_recv(&mut self, interface_addr: &str) -> Reply {
        self.recv_reply(interface_addr, |msg, strict, id| {
            Message::unpack_query(msg, id, strict)
        })
    }

    /// The local address of an interface's open socket, `None` while the
    /// interface has no socket. The port is the ephemeral one the OS
    /// assigned at open.
    pub fn local_addr(&self, interface_addr: &str) -> Option<std::net::SocketAddr> {
        let socket = self.sockets.get(interface_addr)?;
        socket.local_addr().ok()
    }

    /// Closes the socket for one interface. Closing an interface without
    /// an open socket is a no-op.
    pub fn close_socket(&mut self, interface_addr: &str) {
        if self.sockets.remove(interface_addr).is_some() {
            log::debug!("closed mdns socket on {interface_addr}");
        }
    }

    /// Closes every open socket. The performer stays usable; the next send
    /// re-opens its interface.
    pub fn close_all(&mut self) {
        self.sockets.clear();
    }

    fn send_packet(&self, interface_addr: &str, packet: &[u8], failure: Error) -> Result<()> {
        let socket = self
            .sockets
            .get(interface_addr)
            .ok_or(Error::ErrUnknownInterface)?;
        match socket.send(packet) {
            Ok(sent) => {
                log::trace!("sent {sent} bytes on {interface_addr}");
                Ok(())
            }
            Err(err) => {
                log::warn!("send on {interface_addr} failed: {err}");
                Err(failure)
            }
        }
    }

    fn recv_reply(
        &mut self,
        interface_addr: &str,
        parse: impl FnOnce(&[u8], bool, u16) -> Result<Message>,
    ) -> Reply {
        let Some(socket) = self.sockets.get(interface_addr) else {
            return Reply::default();
        };
        let Some((len, src)) = socket.recv(&mut self.buffer[..]) else {
            return Reply::default();
        };
        log::trace!("received {len} bytes from {src} on {interface_addr}");

        let mut reply = Reply {
            from_address: src.ip().to_string(),
            from_port: src.port(),
            ..Default::default()
        };
        match parse(
            &self.buffer[..len],
            self.config.strict_compression,
            self.transaction_id,
        ) {
            Ok(message) => {
                reply.answer = message.answer;
                reply.authority = message.authority;
                reply.additional = message.additional;
            }
            Err(err) => {
                log::debug!("ignoring datagram from {src}: {err}");
            }
        }
        reply
    }
}
