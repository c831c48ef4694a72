#[cfg(test)]
mod message_test;

pub(crate) mod header;
pub(crate) mod name;
mod packer;
pub(crate) mod question;
pub(crate) mod resource;

use std::fmt;

use header::Header;
use name::Name;
use packer::*;
use question::Question;
use resource::unpack_record_data;

use crate::reply::{Entry, RecordHeader};
use shared::error::{Error, Result};

// A Type is a type of DNS request and response.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DnsType {
    /// IPv4 host address.
    A = 1,
    /// Domain name pointer; DNS-SD uses it to enumerate service instances.
    Ptr = 12,
    /// Key/value text strings.
    Txt = 16,
    /// IPv6 host address.
    Aaaa = 28,
    /// Service location (RFC 2782).
    Srv = 33,
    /// Any record type this client does not parse.
    #[default]
    Ignore = 0,
}

impl From<u16> for DnsType {
    fn from(v: u16) -> Self {
        match v {
            1 => DnsType::A,
            12 => DnsType::Ptr,
            16 => DnsType::Txt,
            28 => DnsType::Aaaa,
            33 => DnsType::Srv,
            _ => DnsType::Ignore,
        }
    }
}

impl fmt::Display for DnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            DnsType::A => "A",
            DnsType::Ptr => "PTR",
            DnsType::Txt => "TXT",
            DnsType::Aaaa => "AAAA",
            DnsType::Srv => "SRV",
            DnsType::Ignore => "IGNORE",
        };
        write!(f, "{s}")
    }
}

impl DnsType {
    // pack appends the wire format of the type to msg.
    pub(crate) fn pack(&self, msg: Vec<u8>) -> Vec<u8> {
        pack_uint16(msg, *self as u16)
    }

    pub(crate) fn skip(msg: &[u8], off: usize) -> Result<usize> {
        skip_uint16(msg, off)
    }
}

/// A DNS class. Only `IN` matters on the Internet; mDNS overlays the top
/// bit with protocol meaning (see [`CLASS_UNICAST_RESPONSE`] and
/// [`CLASS_MASK`]).
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct DnsClass(pub u16);

/// Internet class (IN).
pub const DNSCLASS_INET: DnsClass = DnsClass(1);

/// In a question, the top bit of the class asks for a unicast response
/// ("QU", RFC 6762 section 5.4). In a record it marks cache-flush; either
/// way it must be masked off before comparing the class proper.
pub const CLASS_UNICAST_RESPONSE: u16 = 0x8000;

/// Mask selecting the class value without the mDNS top bit.
pub const CLASS_MASK: u16 = 0x7FFF;

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if DnsClass(self.0 & CLASS_MASK) == DNSCLASS_INET {
            write!(f, "ClassINET")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl DnsClass {
    // pack appends the wire format of the class to msg.
    pub(crate) fn pack(&self, msg: Vec<u8>) -> Vec<u8> {
        pack_uint16(msg, self.0)
    }

    pub(crate) fn skip(msg: &[u8], off: usize) -> Result<usize> {
        skip_uint16(msg, off)
    }
}

// Internal constants.

// UINT16LEN is the length (in bytes) of a uint16.
pub(crate) const UINT16LEN: usize = 2;

// UINT32LEN is the length (in bytes) of a uint32.
pub(crate) const UINT32LEN: usize = 4;

// HEADER_LEN is the length (in bytes) of a DNS header.
pub(crate) const HEADER_LEN: usize = 6 * UINT16LEN;

const HEADER_BIT_QR: u16 = 1 << 15; // query/response (response=1)
const HEADER_BIT_AA: u16 = 1 << 10; // authoritative

// A discovery reply must be exactly a standard authoritative response.
pub(crate) const DISCOVERY_RESPONSE_BITS: u16 = HEADER_BIT_QR | HEADER_BIT_AA;

/// The DNS-SD service enumeration name (RFC 6763 section 9).
pub const SERVICES_QUERY_NAME: &str = "_services._dns-sd._udp.local.";

// Its wire encoding, compared against echoed questions without decoding.
const SERVICES_QUERY_NAME_WIRE: &[u8] = b"\x09_services\x07_dns-sd\x04_udp\x05local\x00";

// A Message is a decoded reply: header plus the three record sections.
#[derive(Default, Debug)]
pub(crate) struct Message {
    pub(crate) header: Header,
    pub(crate) answer: Entry,
    pub(crate) authority: Entry,
    pub(crate) additional: Entry,
}

impl Message {
    // unpack_discovery parses a reply to the service enumeration question.
    // The transaction id must be zero and the flags exactly the standard
    // authoritative-response shape; an echoed question must be the service
    // enumeration name, PTR type, class IN.
    pub(crate) fn unpack_discovery(msg: &[u8], strict: bool) -> Result<Message> {
        let mut header = Header::default();
        let mut off = header.unpack(msg, 0)?;

        if header.id != 0 || header.bits != DISCOVERY_RESPONSE_BITS {
            return Err(Error::ErrNotOurReply);
        }
        if header.questions > 1 {
            return Err(Error::ErrTooManyQuestions);
        }

        for _ in 0..header.questions {
            if !Name::equal(msg, off, SERVICES_QUERY_NAME_WIRE, 0) {
                return Err(Error::ErrQuestionMismatch);
            }
            off = Name::skip(msg, off)?;
            let (typ, next) = unpack_uint16(msg, off)?;
            let (class, next) = unpack_uint16(msg, next)?;
            if DnsType::from(typ) != DnsType::Ptr || (class & CLASS_MASK) != DNSCLASS_INET.0 {
                return Err(Error::ErrQuestionMismatch);
            }
            off = next;
        }

        Self::unpack_sections(msg, off, header, strict)
    }

    // unpack_query parses a reply to the last question this client
    // multicast. Only the transaction id is matched; responders disagree
    // about the flags they set, so the flags word is deliberately ignored.
    pub(crate) fn unpack_query(msg: &[u8], expected_id: u16, strict: bool) -> Result<Message> {
        let mut header = Header::default();
        let mut off = header.unpack(msg, 0)?;

        if header.id != expected_id {
            return Err(Error::ErrTransactionIdMismatch);
        }
        if header.questions > 1 {
            return Err(Error::ErrTooManyQuestions);
        }

        for _ in 0..header.questions {
            off = Question::skip(msg, off)?;
        }

        Self::unpack_sections(msg, off, header, strict)
    }

    fn unpack_sections(msg: &[u8], off: usize, header: Header, strict: bool) -> Result<Message> {
        let mut m = Message {
            header,
            ..Default::default()
        };
        let off = Self::unpack_section(&mut m.answer, msg, off, header.answers, strict)?;
        let off = Self::unpack_section(&mut m.authority, msg, off, header.authorities, strict)?;
        Self::unpack_section(&mut m.additional, msg, off, header.additionals, strict)?;
        Ok(m)
    }

    // unpack_section reads count resource records into entry. A record
    // whose rdata cannot be decoded is dropped; the cursor advances by the
    // declared rdata length either way, so one bad record never desyncs
    // the rest of the message.
    fn unpack_section(
        entry: &mut Entry,
        msg: &[u8],
        mut off: usize,
        count: u16,
        strict: bool,
    ) -> Result<usize> {
        for _ in 0..count {
            off = Name::skip(msg, off)?;
            let mut header = RecordHeader::default();
            off = header.unpack(msg, off)?;
            let length = header.length as usize;
            if off > msg.len() || length > msg.len() - off {
                return Err(Error::ErrCalcLen);
            }
            match unpack_record_data(header.typ, msg, off, header.length, strict) {
                Ok(data) => entry.push(header, data),
                Err(err) => {
                    log::debug!("dropping unparseable {} record: {err}", header.typ);
                }
            }
            off += length;
        }
        Ok(off)
    }
}

// build_discovery_query returns the canonical DNS-SD service enumeration
// packet: transaction id zero, no flags, one PTR question for
// "_services._dns-sd._udp.local." with the QU bit set.
pub(crate) fn build_discovery_query() -> Result<Vec<u8>> {
    build_question(0, DnsType::Ptr, SERVICES_QUERY_NAME)
}

// build_query returns a single-question packet for (typ, name) with the
// given transaction id and the QU bit set.
pub(crate) fn build_query(id: u16, typ: DnsType, name: &str) -> Result<Vec<u8>> {
    build_question(id, typ, name)
}

fn build_question(id: u16, typ: DnsType, name: &str) -> Result<Vec<u8>> {
    let header = Header {
        id,
        questions: 1,
        ..Default::default()
    };
    let question = Question {
        name: Name::new(name)?,
        typ,
        class: DnsClass(CLASS_UNICAST_RESPONSE | DNSCLASS_INET.0),
    };
    let msg = header.pack(Vec::with_capacity(HEADER_LEN + name.len() + 2 + 2 * UINT16LEN));
    question.pack(msg)
}
