use std::net::Ipv4Addr;

use super::super::packer::unpack_bytes;
use shared::error::{Error, Result};

// An A record's rdata is exactly the four address octets.
pub(crate) fn unpack(msg: &[u8], off: usize, length: u16) -> Result<Ipv4Addr> {
    if length != 4 {
        return Err(Error::ErrRecordLength);
    }
    let (octets, _) = unpack_bytes(msg, off, 4)?;
    Ok(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
}
