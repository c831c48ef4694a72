use std::fmt;

use super::name::Name;
use super::{DnsClass, DnsType};
use shared::error::Result;

// A question is a DNS query.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Question {
    pub(crate) name: Name,
    pub(crate) typ: DnsType,
    pub(crate) class: DnsClass,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Question{{Name: {}, Type: {}, Class: {}}}",
            self.name, self.typ, self.class
        )
    }
}

impl Question {
    // pack appends the wire format of the question to msg.
    pub(crate) fn pack(&self, mut msg: Vec<u8>) -> Result<Vec<u8>> {
        msg = self.name.pack(msg)?;
        msg = self.typ.pack(msg);
        Ok(self.class.pack(msg))
    }

    // skip advances past a question without materialising it.
    pub(crate) fn skip(msg: &[u8], off: usize) -> Result<usize> {
        let off = Name::skip(msg, off)?;
        let off = DnsType::skip(msg, off)?;
        DnsClass::skip(msg, off)
    }
}
