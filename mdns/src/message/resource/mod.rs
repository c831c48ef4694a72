pub(crate) mod a;
pub(crate) mod aaaa;
pub(crate) mod ptr;
pub(crate) mod srv;
pub(crate) mod txt;

use std::net::{Ipv4Addr, Ipv6Addr};

use super::name::Name;
use super::packer::*;
use super::{DnsClass, DnsType};
use crate::reply::{RecordHeader, TxtEntry};
use shared::error::Result;

impl RecordHeader {
    // unpack reads the fixed ten octets that follow a record's owner name:
    // type, class, TTL, rdata length. The TTL is a 32-bit field.
    pub(crate) fn unpack(&mut self, msg: &[u8], off: usize) -> Result<usize> {
        let (typ, off) = unpack_uint16(msg, off)?;
        let (class, off) = unpack_uint16(msg, off)?;
        let (ttl, off) = unpack_uint32(msg, off)?;
        let (length, off) = unpack_uint16(msg, off)?;
        self.typ = DnsType::from(typ);
        self.class = DnsClass(class);
        self.ttl = ttl;
        self.length = length;
        Ok(off)
    }
}

// Decoded rdata for the record types the client understands. Everything
// else is Ignore: positionally skipped, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ptr(Name),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: Name,
    },
    Txt(Vec<TxtEntry>),
    Ignore,
}

// unpack_record_data decodes the rdata at [off, off + length). The caller
// has already checked that the range lies inside msg; an error here means
// the record itself is malformed and should be dropped.
pub(crate) fn unpack_record_data(
    typ: DnsType,
    msg: &[u8],
    off: usize,
    length: u16,
    strict: bool,
) -> Result<RecordData> {
    match typ {
        DnsType::A => a::unpack(msg, off, length).map(RecordData::A),
        DnsType::Aaaa => aaaa::unpack(msg, off, length).map(RecordData::Aaaa),
        DnsType::Ptr => ptr::unpack(msg, off, length, strict).map(RecordData::Ptr),
        DnsType::Srv => srv::unpack(msg, off, length, strict),
        DnsType::Txt => txt::unpack(msg, off, length).map(RecordData::Txt),
        DnsType::Ignore => Ok(RecordData::Ignore),
    }
}
