use std::net::Ipv6Addr;

use super::super::packer::unpack_bytes;
use shared::error::{Error, Result};

// An AAAA record's rdata is exactly the sixteen address octets.
pub(crate) fn unpack(msg: &[u8], off: usize, length: u16) -> Result<Ipv6Addr> {
    if length != 16 {
        return Err(Error::ErrRecordLength);
    }
    let (octets, _) = unpack_bytes(msg, off, 16)?;
    let mut addr = [0u8; 16];
    addr.copy_from_slice(octets);
    Ok(Ipv6Addr::from(addr))
}
