use super::super::name::Name;
use shared::error::{Error, Result};

// A PTR record's rdata is a single name; two octets is the smallest valid
// encoding (a lone compression pointer).
pub(crate) fn unpack(msg: &[u8], off: usize, length: u16, strict: bool) -> Result<Name> {
    if length < 2 {
        return Err(Error::ErrRecordLength);
    }
    let mut name = Name::default();
    name.unpack_with(msg, off, strict)?;
    Ok(name)
}
