use super::super::packer::unpack_uint8;
use crate::reply::TxtEntry;
use shared::error::Result;

// A TXT record's rdata is a run of length-prefixed strings. DNS-SD gives
// each string the shape "key=value" and requires keys to be printable
// US-ASCII (RFC 6763 section 6.4). Strings with no separator, an empty
// key, or a non-printable byte before the separator are dropped; the value
// may be empty and may contain arbitrary octets.
pub(crate) fn unpack(msg: &[u8], off: usize, length: u16) -> Result<Vec<TxtEntry>> {
    let mut entries = Vec::new();
    let mut curr = off;
    let end = off + length as usize;

    while curr < end {
        let (len, next) = unpack_uint8(msg, curr)?;
        let label_end = next + len as usize;
        if label_end > end {
            // Truncated final string; keep what was parsed so far.
            break;
        }
        let label = &msg[next..label_end];
        curr = label_end;

        let mut separator = None;
        for (i, &c) in label.iter().enumerate() {
            if !(0x20..=0x7E).contains(&c) {
                break;
            }
            if c == b'=' {
                separator = Some(i);
                break;
            }
        }
        let Some(separator) = separator else {
            continue;
        };
        if separator == 0 {
            continue;
        }

        entries.push(TxtEntry {
            key: String::from_utf8_lossy(&label[..separator]).into_owned(),
            value: String::from_utf8_lossy(&label[separator + 1..]).into_owned(),
        });
    }

    Ok(entries)
}
