use std::fmt;

use super::packer::*;
use shared::error::{Error, Result};

// Longest allowed presentation form of a name (RFC 1035 section 2.3.4).
pub(crate) const MAX_NAME_LEN: usize = 255;

// Longest allowed single label.
const MAX_LABEL_LEN: usize = 63;

// A Name is a DNS domain name in dotted presentation form, e.g.
// "_http._tcp.local.". On the wire it is a run of length-prefixed labels
// terminated by a zero octet, any tail of which may be replaced by a
// two-octet compression pointer back into the packet.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Name {
    pub(crate) data: String,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl Name {
    pub(crate) fn new(data: &str) -> Result<Self> {
        if data.len() > MAX_NAME_LEN {
            return Err(Error::ErrNameTooLong);
        }
        Ok(Name {
            data: data.to_owned(),
        })
    }

    // pack appends the wire format of the name to msg: one length-prefixed
    // label per dot-separated segment, then the terminating zero octet.
    // Compression is never emitted; our outgoing packets carry one name.
    pub(crate) fn pack(&self, mut msg: Vec<u8>) -> Result<Vec<u8>> {
        for label in self.data.split('.') {
            if label.is_empty() {
                continue;
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(Error::ErrSegmentTooLong);
            }
            msg.push(label.len() as u8);
            msg = pack_bytes(msg, label.as_bytes());
        }
        msg.push(0);
        Ok(msg)
    }

    // unpack reads a possibly compressed name starting at off. The returned
    // offset is the position just past the name as it stood at off: the
    // first compression pointer fixes it at two octets past itself, no
    // matter where decoding jumps afterwards.
    pub(crate) fn unpack(&mut self, msg: &[u8], off: usize) -> Result<usize> {
        self.unpack_with(msg, off, false)
    }

    // unpack_with is unpack plus an optional strictness check: every
    // pointer target must precede the position the pointer was read from,
    // the only form RFC 1035 sanctions.
    pub(crate) fn unpack_with(&mut self, msg: &[u8], off: usize, strict: bool) -> Result<usize> {
        let mut data = String::new();
        let mut curr = off;
        let mut end = None;
        // A well-formed name never revisits an octet, so the running count
        // of consumed wire bytes is capped by the packet length. Pointer
        // loops blow past the cap and abort.
        let mut visited = 0;

        let end = loop {
            let (b, next) = unpack_uint8(msg, curr)?;
            match b & 0xC0 {
                0x00 => {
                    if b == 0 {
                        break end.unwrap_or(next);
                    }
                    let length = b as usize;
                    let (label, after) = unpack_bytes(msg, next, length)?;
                    visited += 1 + length;
                    if visited > msg.len() {
                        return Err(Error::ErrTooManyPointers);
                    }
                    if data.len() + length + 1 > MAX_NAME_LEN {
                        return Err(Error::ErrNameTooLong);
                    }
                    for &c in label {
                        data.push(char::from(c));
                    }
                    data.push('.');
                    curr = after;
                }
                0xC0 => {
                    let (low, after) = unpack_uint8(msg, next)?;
                    let target = ((b as usize & 0x3F) << 8) | low as usize;
                    if end.is_none() {
                        end = Some(after);
                    }
                    if target >= msg.len() {
                        return Err(Error::ErrInvalidPointer);
                    }
                    if strict && target >= curr {
                        return Err(Error::ErrInvalidPointer);
                    }
                    visited += 2;
                    if visited > msg.len() {
                        return Err(Error::ErrTooManyPointers);
                    }
                    curr = target;
                }
                _ => return Err(Error::ErrReservedLabelBits),
            }
        };

        self.data = data;
        Ok(end)
    }

    // skip advances past a name without materialising it.
    pub(crate) fn skip(msg: &[u8], off: usize) -> Result<usize> {
        let mut labels = Labels::new(msg, off);
        while labels.next_label()?.is_some() {}
        Ok(labels.end())
    }

    // equal walks two wire-format names in parallel, comparing labels
    // case-insensitively. Each side carries its own compression state, so
    // either name may be compressed against its own packet.
    pub(crate) fn equal(lhs: &[u8], lhs_off: usize, rhs: &[u8], rhs_off: usize) -> bool {
        let mut lhs = Labels::new(lhs, lhs_off);
        let mut rhs = Labels::new(rhs, rhs_off);
        loop {
            match (lhs.next_label(), rhs.next_label()) {
                (Ok(None), Ok(None)) => return true,
                (Ok(Some(a)), Ok(Some(b))) => {
                    if !a.eq_ignore_ascii_case(b) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

// Label-by-label walk over one wire-format name, following compression
// pointers with the same visited-bytes bound as Name::unpack_with.
struct Labels<'a> {
    msg: &'a [u8],
    curr: usize,
    end: Option<usize>,
    visited: usize,
}

impl<'a> Labels<'a> {
    fn new(msg: &'a [u8], off: usize) -> Self {
        Labels {
            msg,
            curr: off,
            end: None,
            visited: 0,
        }
    }

    // next_label yields the next label's octets, or None at the terminating
    // zero octet.
    fn next_label(&mut self) -> Result<Option<&'a [u8]>> {
        loop {
            let (b, next) = unpack_uint8(self.msg, self.curr)?;
            match b & 0xC0 {
                0x00 => {
                    if b == 0 {
                        if self.end.is_none() {
                            self.end = Some(next);
                        }
                        return Ok(None);
                    }
                    let (label, after) = unpack_bytes(self.msg, next, b as usize)?;
                    self.visited += 1 + b as usize;
                    if self.visited > self.msg.len() {
                        return Err(Error::ErrTooManyPointers);
                    }
                    self.curr = after;
                    return Ok(Some(label));
                }
                0xC0 => {
                    let (low, after) = unpack_uint8(self.msg, next)?;
                    let target = ((b as usize & 0x3F) << 8) | low as usize;
                    if self.end.is_none() {
                        self.end = Some(after);
                    }
                    if target >= self.msg.len() {
                        return Err(Error::ErrInvalidPointer);
                    }
                    self.visited += 2;
                    if self.visited > self.msg.len() {
                        return Err(Error::ErrTooManyPointers);
                    }
                    self.curr = target;
                }
                _ => return Err(Error::ErrReservedLabelBits),
            }
        }
    }

    // end is the offset just past the name at its original position, valid
    // once next_label has returned None.
    fn end(&self) -> usize {
        self.end.unwrap_or(self.curr)
    }
}
