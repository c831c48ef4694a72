//! The owned value types a receive call hands back to the caller.
//!
//! A [`Reply`] is a tree: three [`Entry`] sections (answer, authority,
//! additional), each holding the decoded records of that section grouped by
//! record type, in wire order within each group. Records the client does
//! not understand are dropped during decoding and never appear here.

use std::net::IpAddr;

use crate::message::resource::RecordData;
use crate::message::{DnsClass, DnsType};

/// The fields every resource record carries after its owner name: type,
/// class (cache-flush bit included as received), TTL and rdata length.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub typ: DnsType,
    pub class: DnsClass,
    pub ttl: u32,
    pub length: u16,
}

/// A PTR record: the name of a service instance (or, for the service
/// enumeration question, of a service type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtrRecord {
    pub header: RecordHeader,
    pub name: String,
}

/// An SRV record: where a service instance lives (RFC 2782).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRecord {
    pub header: RecordHeader,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// One key/value pair from a TXT record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtEntry {
    pub key: String,
    pub value: String,
}

/// A TXT record: the DNS-SD key/value pairs of one resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtRecord {
    pub header: RecordHeader,
    pub entries: Vec<TxtEntry>,
}

/// An A or AAAA record; the header's type tells which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub header: RecordHeader,
    pub address: IpAddr,
}

/// The records of one message section, grouped by record type.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub ptr_records: Vec<PtrRecord>,
    pub txt_records: Vec<TxtRecord>,
    pub srv_records: Vec<SrvRecord>,
    pub a_records: Vec<AddressRecord>,
    pub aaaa_records: Vec<AddressRecord>,
}

impl Entry {
    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.ptr_records.len()
            + self.txt_records.len()
            + self.srv_records.len()
            + self.a_records.len()
            + self.aaaa_records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends every record of `other`, preserving order within each group.
    /// Callers polling an interface repeatedly use this to aggregate the
    /// entries of successive replies.
    pub fn merge(&mut self, other: Entry) {
        self.ptr_records.extend(other.ptr_records);
        self.txt_records.extend(other.txt_records);
        self.srv_records.extend(other.srv_records);
        self.a_records.extend(other.a_records);
        self.aaaa_records.extend(other.aaaa_records);
    }

    pub(crate) fn push(&mut self, header: RecordHeader, data: RecordData) {
        match data {
            RecordData::A(address) => self.a_records.push(AddressRecord {
                header,
                address: IpAddr::V4(address),
            }),
            RecordData::Aaaa(address) => self.aaaa_records.push(AddressRecord {
                header,
                address: IpAddr::V6(address),
            }),
            RecordData::Ptr(name) => self.ptr_records.push(PtrRecord {
                header,
                name: name.data,
            }),
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => self.srv_records.push(SrvRecord {
                header,
                priority,
                weight,
                port,
                target: target.data,
            }),
            RecordData::Txt(entries) => self.txt_records.push(TxtRecord { header, entries }),
            RecordData::Ignore => {}
        }
    }
}

/// One parsed reply datagram.
///
/// An empty reply (all three entries empty) is how a receive call says
/// "nothing useful": no datagram was pending, the datagram was not a reply
/// to this client's question, or it was malformed. When a datagram was
/// read, `from_address` and `from_port` identify its sender even if
/// validation then rejected it; both are blank otherwise.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub from_address: String,
    pub from_port: u16,
    pub answer: Entry,
    pub authority: Entry,
    pub additional: Entry,
}

impl Reply {
    /// True when no section holds any record.
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty() && self.authority.is_empty() && self.additional.is_empty()
    }

    /// Total number of records across all sections.
    pub fn record_count(&self) -> usize {
        self.answer.len() + self.authority.len() + self.additional.len()
    }

    /// Folds another reply's sections into this one.
    pub fn merge(&mut self, other: Reply) {
        self.answer.merge(other.answer);
        self.authority.merge(other.authority);
        self.additional.merge(other.additional);
    }
}
