//! Local interface enumeration.
//!
//! The performer only needs a set of local interface addresses; everything
//! else about the host's network configuration is irrelevant to it. This
//! module is the single place that talks to the OS, so callers (and tests)
//! can substitute their own interface lists.

use std::net::IpAddr;

use crate::error::Result;

/// One local interface address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// OS interface name, e.g. `"eth0"`.
    pub name: String,
    /// The address assigned to the interface.
    pub addr: IpAddr,
}

/// Enumerates every address assigned to a local interface, both families,
/// loopback included.
pub fn ifaces() -> Result<Vec<Interface>> {
    let addrs = if_addrs::get_if_addrs()?;
    Ok(addrs
        .into_iter()
        .map(|iface| Interface {
            addr: iface.ip(),
            name: iface.name,
        })
        .collect())
}
