use std::fmt;

use super::packer::*;
use shared::error::Result;

// A Header is the fixed 12-byte DNS message header: six big-endian u16
// fields, no padding.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) id: u16,
    pub(crate) bits: u16,
    pub(crate) questions: u16,
    pub(crate) answers: u16,
    pub(crate) authorities: u16,
    pub(crate) additionals: u16,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Header{{id: {}, bits: {:#06x}, questions: {}, answers: {}, authorities: {}, additionals: {}}}",
            self.id, self.bits, self.questions, self.answers, self.authorities, self.additionals,
        )
    }
}

impl Header {
    // pack appends the wire format of the header to msg.
    pub(crate) fn pack(&self, mut msg: Vec<u8>) -> Vec<u8> {
        msg = pack_uint16(msg, self.id);
        msg = pack_uint16(msg, self.bits);
        msg = pack_uint16(msg, self.questions);
        msg = pack_uint16(msg, self.answers);
        msg = pack_uint16(msg, self.authorities);
        msg = pack_uint16(msg, self.additionals);
        msg
    }

    pub(crate) fn unpack(&mut self, msg: &[u8], off: usize) -> Result<usize> {
        let (id, off) = unpack_uint16(msg, off)?;
        let (bits, off) = unpack_uint16(msg, off)?;
        let (questions, off) = unpack_uint16(msg, off)?;
        let (answers, off) = unpack_uint16(msg, off)?;
        let (authorities, off) = unpack_uint16(msg, off)?;
        let (additionals, off) = unpack_uint16(msg, off)?;
        self.id = id;
        self.bits = bits;
        self.questions = questions;
        self.answers = answers;
        self.authorities = authorities;
        self.additionals = additionals;
        Ok(off)
    }
}
