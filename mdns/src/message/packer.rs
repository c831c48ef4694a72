use super::{UINT16LEN, UINT32LEN};
use shared::error::{Error, Result};

// Field-level packing and unpacking. All multi-byte fields are network byte
// order; unpacking never reads past the message and fails without advancing.

// pack_uint16 appends the wire format of v to msg.
pub(crate) fn pack_uint16(mut msg: Vec<u8>, v: u16) -> Vec<u8> {
    msg.extend_from_slice(&v.to_be_bytes());
    msg
}

// pack_uint32 appends the wire format of v to msg.
pub(crate) fn pack_uint32(mut msg: Vec<u8>, v: u32) -> Vec<u8> {
    msg.extend_from_slice(&v.to_be_bytes());
    msg
}

// pack_bytes appends b to msg.
pub(crate) fn pack_bytes(mut msg: Vec<u8>, b: &[u8]) -> Vec<u8> {
    msg.extend_from_slice(b);
    msg
}

pub(crate) fn unpack_uint8(msg: &[u8], off: usize) -> Result<(u8, usize)> {
    if off >= msg.len() {
        return Err(Error::ErrBaseLen);
    }
    Ok((msg[off], off + 1))
}

pub(crate) fn unpack_uint16(msg: &[u8], off: usize) -> Result<(u16, usize)> {
    if msg.len() < UINT16LEN || off > msg.len() - UINT16LEN {
        return Err(Error::ErrBaseLen);
    }
    Ok((u16::from_be_bytes([msg[off], msg[off + 1]]), off + UINT16LEN))
}

pub(crate) fn unpack_uint32(msg: &[u8], off: usize) -> Result<(u32, usize)> {
    if msg.len() < UINT32LEN || off > msg.len() - UINT32LEN {
        return Err(Error::ErrBaseLen);
    }
    let v = u32::from_be_bytes([msg[off], msg[off + 1], msg[off + 2], msg[off + 3]]);
    Ok((v, off + UINT32LEN))
}

// unpack_bytes returns the len octets at off without copying them.
pub(crate) fn unpack_bytes(msg: &[u8], off: usize, len: usize) -> Result<(&[u8], usize)> {
    if off > msg.len() || len > msg.len() - off {
        return Err(Error::ErrCalcLen);
    }
    Ok((&msg[off..off + len], off + len))
}

pub(crate) fn skip_uint16(msg: &[u8], off: usize) -> Result<usize> {
    if msg.len() < UINT16LEN || off > msg.len() - UINT16LEN {
        return Err(Error::ErrBaseLen);
    }
    Ok(off + UINT16LEN)
}

pub(crate) fn skip_uint32(msg: &[u8], off: usize) -> Result<usize> {
    if msg.len() < UINT32LEN || off > msg.len() - UINT32LEN {
        return Err(Error::ErrBaseLen);
    }
    Ok(off + UINT32LEN)
}
