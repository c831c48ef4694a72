//! # mdns
//!
//! A client library for mDNS (Multicast DNS, RFC 6762) and DNS-SD
//! (DNS-based Service Discovery, RFC 6763): discover the services peers on
//! the local link advertise by multicasting questions and parsing whatever
//! comes back.
//!
//! ## What it does
//!
//! - **DNS-SD discovery**: multicast the service enumeration question
//!   (`_services._dns-sd._udp.local.` PTR) and collect the service types
//!   present on the link.
//! - **mDNS queries**: multicast a question for any name and record type
//!   (A, AAAA, PTR, SRV, TXT) and collect typed replies.
//! - **Wire codec**: a full decoder for reply messages, including
//!   compressed names with loop protection, and typed record payloads.
//!
//! This crate is a client only. It never answers questions, never binds
//! port 5353, and keeps no cache: every reply is handed to the caller as a
//! self-contained [`Reply`] value.
//!
//! ## Non-blocking by contract
//!
//! All sockets are non-blocking and the [`RequestPerformer`] makes no
//! blocking promises: a receive call returns the pending datagram or an
//! empty [`Reply`] immediately. Callers own the pacing — a typical driver
//! sends once, then polls each interface on its own schedule:
//!
//! ```no_run
//! use std::thread::sleep;
//! use std::time::Duration;
//!
//! use mdns::{DnsType, RequestPerformer};
//!
//! fn main() -> Result<(), shared::error::Error> {
//!     let mut performer = RequestPerformer::new()?;
//!     for interface in performer.list_ipv4_interfaces() {
//!         performer.query_send(&interface, DnsType::Ptr, "_http._tcp.local.")?;
//!         for _ in 0..10 {
//!             let reply = performer.query_recv(&interface);
//!             for ptr in &reply.answer.ptr_records {
//!                 println!("{} -> {}", reply.from_address, ptr.name);
//!             }
//!             sleep(Duration::from_secs(1));
//!         }
//!     }
//!     performer.close_all();
//!     Ok(())
//! }
//! ```
//!
//! A single performer is not safe for concurrent use; independent
//! performers are.

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub(crate) mod config;
pub(crate) mod message;
pub(crate) mod performer;
pub(crate) mod reply;
pub(crate) mod socket;

pub use config::MdnsConfig;
pub use message::{
    DnsClass, DnsType, CLASS_MASK, CLASS_UNICAST_RESPONSE, DNSCLASS_INET, SERVICES_QUERY_NAME,
};
pub use performer::RequestPerformer;
pub use reply::{
    AddressRecord, Entry, PtrRecord, RecordHeader, Reply, SrvRecord, TxtEntry, TxtRecord,
};
pub use socket::{
    MdnsSocket, MulticastSocket, MDNS_MULTICAST_IPV4, MDNS_MULTICAST_IPV6, MDNS_PORT,
};

// Re-export interface enumeration for convenience.
pub use shared::ifaces;
