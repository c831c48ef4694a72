use super::super::name::Name;
use super::super::packer::unpack_uint16;
use super::RecordData;
use shared::error::{Error, Result};

// An SRV record's rdata (RFC 2782): priority, weight and port as big-endian
// u16s, then the target name. Eight octets is the compressed minimum.
pub(crate) fn unpack(msg: &[u8], off: usize, length: u16, strict: bool) -> Result<RecordData> {
    if length < 8 {
        return Err(Error::ErrRecordLength);
    }
    let (priority, off) = unpack_uint16(msg, off)?;
    let (weight, off) = unpack_uint16(msg, off)?;
    let (port, off) = unpack_uint16(msg, off)?;
    let mut target = Name::default();
    target.unpack_with(msg, off, strict)?;
    Ok(RecordData::Srv {
        priority,
        weight,
        port,
        target,
    })
}
