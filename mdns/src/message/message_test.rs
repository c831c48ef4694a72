use super::name::Name;
use super::packer::*;
use super::*;
use crate::reply::TxtEntry;

// The canonical service enumeration packet, byte for byte.
const DISCOVERY_PACKET: [u8; 46] = [
    0x00, 0x00, // transaction id
    0x00, 0x00, // flags
    0x00, 0x01, // one question
    0x00, 0x00, // no answer RRs
    0x00, 0x00, // no authority RRs
    0x00, 0x00, // no additional RRs
    0x09, b'_', b's', b'e', b'r', b'v', b'i', b'c', b'e', b's', //
    0x07, b'_', b'd', b'n', b's', b'-', b's', b'd', //
    0x04, b'_', b'u', b'd', b'p', //
    0x05, b'l', b'o', b'c', b'a', b'l', //
    0x00, // root
    0x00, 0x0C, // PTR
    0x80, 0x01, // QU | class IN
];

fn header(id: u16, bits: u16, qd: u16, an: u16, ns: u16, ar: u16) -> Vec<u8> {
    header::Header {
        id,
        bits,
        questions: qd,
        answers: an,
        authorities: ns,
        additionals: ar,
    }
    .pack(Vec::new())
}

fn pack_name(msg: Vec<u8>, name: &str) -> Vec<u8> {
    Name::new(name).unwrap().pack(msg).unwrap()
}

// Appends an RR with the given owner-name bytes and rdata.
fn pack_record(mut msg: Vec<u8>, owner: &[u8], typ: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
    msg = pack_bytes(msg, owner);
    msg = pack_uint16(msg, typ);
    msg = pack_uint16(msg, DNSCLASS_INET.0);
    msg = pack_uint32(msg, ttl);
    msg = pack_uint16(msg, rdata.len() as u16);
    pack_bytes(msg, rdata)
}

#[test]
fn test_packer_bounds() {
    let buf = [0x12u8, 0x34, 0x56, 0x78];

    assert_eq!(unpack_uint8(&buf, 3).unwrap(), (0x78, 4));
    assert_eq!(unpack_uint8(&buf, 4), Err(shared::error::Error::ErrBaseLen));

    assert_eq!(unpack_uint16(&buf, 0).unwrap(), (0x1234, 2));
    assert_eq!(unpack_uint16(&buf, 2).unwrap(), (0x5678, 4));
    assert_eq!(unpack_uint16(&buf, 3), Err(shared::error::Error::ErrBaseLen));

    assert_eq!(unpack_uint32(&buf, 0).unwrap(), (0x12345678, 4));
    assert_eq!(unpack_uint32(&buf, 1), Err(shared::error::Error::ErrBaseLen));

    assert_eq!(unpack_bytes(&buf, 1, 3).unwrap(), (&buf[1..4], 4));
    assert_eq!(
        unpack_bytes(&buf, 1, 4),
        Err(shared::error::Error::ErrCalcLen)
    );
    // Offsets past the end fail rather than wrap.
    assert_eq!(
        unpack_bytes(&buf, 5, 0),
        Err(shared::error::Error::ErrCalcLen)
    );
}

#[test]
fn test_name_round_trip() {
    for name in [
        "_http._tcp.local.",
        "_services._dns-sd._udp.local.",
        "host.local.",
        "printer._ipp._tcp.local.",
        "a.b.",
    ] {
        let wire = pack_name(Vec::new(), name);
        let mut decoded = Name::default();
        let end = decoded.unpack(&wire, 0).unwrap();
        assert_eq!(decoded.data, name, "round trip of {name}");
        assert_eq!(end, wire.len(), "cursor after {name}");
    }

    // Names without a trailing dot normalise to one.
    let wire = pack_name(Vec::new(), "host.local");
    let mut decoded = Name::default();
    decoded.unpack(&wire, 0).unwrap();
    assert_eq!(decoded.data, "host.local.");
}

#[test]
fn test_name_label_limits() {
    let max_label = "a".repeat(63);
    let wire = pack_name(Vec::new(), &format!("{max_label}.local."));
    let mut decoded = Name::default();
    decoded.unpack(&wire, 0).unwrap();
    assert_eq!(decoded.data, format!("{max_label}.local."));

    let long_label = "a".repeat(64);
    let err = Name::new(&format!("{long_label}.local."))
        .unwrap()
        .pack(Vec::new());
    assert_eq!(err, Err(shared::error::Error::ErrSegmentTooLong));

    assert_eq!(
        Name::new(&"a.".repeat(200)),
        Err(shared::error::Error::ErrNameTooLong)
    );
}

#[test]
fn test_name_decode_too_long() {
    // Five labels of 63 bytes wire-encode to 320 octets, over the 255-byte
    // name ceiling.
    let mut wire = Vec::new();
    for _ in 0..5 {
        wire.push(63);
        wire.extend_from_slice(&[b'x'; 63]);
    }
    wire.push(0);

    let mut decoded = Name::default();
    assert_eq!(
        decoded.unpack(&wire, 0),
        Err(shared::error::Error::ErrNameTooLong)
    );
}

#[test]
fn test_name_compression() {
    // Question name at offset 12, answer owner pointing back at it.
    let mut msg = header(0, 0, 1, 0, 0, 0);
    msg = pack_name(msg, "_http._tcp.local.");
    let pointer_at = msg.len();
    msg.push(0xC0);
    msg.push(0x0C);

    let mut decoded = Name::default();
    let end = decoded.unpack(&msg, pointer_at).unwrap();
    assert_eq!(decoded.data, "_http._tcp.local.");
    // The cursor advances exactly two octets past the pointer, not to the
    // end of its target.
    assert_eq!(end, pointer_at + 2);

    assert_eq!(Name::skip(&msg, pointer_at).unwrap(), pointer_at + 2);
}

#[test]
fn test_name_compression_mid_name() {
    // "printer" + pointer to ".local." inside an earlier name.
    let mut msg = header(0, 0, 0, 0, 0, 0);
    msg = pack_name(msg, "host.local.");
    let local_at = 12 + 5; // past "host" label
    let start = msg.len();
    msg.push(7);
    msg = pack_bytes(msg, b"printer");
    msg.push(0xC0);
    msg.push(local_at as u8);

    let mut decoded = Name::default();
    let end = decoded.unpack(&msg, start).unwrap();
    assert_eq!(decoded.data, "printer.local.");
    assert_eq!(end, msg.len());
}

#[test]
fn test_name_pointer_loop() {
    // A name at offset 12 that is a pointer to itself.
    let mut msg = header(0, 0, 0, 0, 0, 0);
    msg.push(0xC0);
    msg.push(0x0C);

    let mut decoded = Name::default();
    assert_eq!(
        decoded.unpack(&msg, 12),
        Err(shared::error::Error::ErrTooManyPointers)
    );
    assert!(Name::skip(&msg, 12).is_err());
}

#[test]
fn test_name_mutual_pointer_loop() {
    let mut msg = header(0, 0, 0, 0, 0, 0);
    msg.push(0xC0);
    msg.push(14);
    msg.push(0xC0);
    msg.push(12);

    let mut decoded = Name::default();
    assert!(decoded.unpack(&msg, 12).is_err());
}

#[test]
fn test_name_pointer_out_of_range() {
    let mut msg = header(0, 0, 0, 0, 0, 0);
    msg.push(0xC0);
    msg.push(0xFF);

    let mut decoded = Name::default();
    assert_eq!(
        decoded.unpack(&msg, 12),
        Err(shared::error::Error::ErrInvalidPointer)
    );
}

#[test]
fn test_name_forward_pointer_strict() {
    // A pointer whose target sits after the pointer itself: tolerated by
    // default, rejected in strict mode.
    let mut msg = header(0, 0, 0, 0, 0, 0);
    msg.push(0xC0);
    msg.push(14);
    msg = pack_name(msg, "host.local.");

    let mut decoded = Name::default();
    let end = decoded.unpack_with(&msg, 12, false).unwrap();
    assert_eq!(decoded.data, "host.local.");
    assert_eq!(end, 14);

    assert_eq!(
        decoded.unpack_with(&msg, 12, true),
        Err(shared::error::Error::ErrInvalidPointer)
    );
}

#[test]
fn test_name_reserved_label_bits() {
    let msg = [0x40u8, 0x00];
    let mut decoded = Name::default();
    assert_eq!(
        decoded.unpack(&msg, 0),
        Err(shared::error::Error::ErrReservedLabelBits)
    );
}

#[test]
fn test_name_truncated_label() {
    let msg = [5u8, b'a', b'b'];
    let mut decoded = Name::default();
    assert!(decoded.unpack(&msg, 0).is_err());
}

#[test]
fn test_name_equal() {
    let lhs = pack_name(Vec::new(), "_HTTP._tcp.LOCAL.");
    let rhs = pack_name(Vec::new(), "_http._TCP.local.");
    assert!(Name::equal(&lhs, 0, &rhs, 0));

    let other = pack_name(Vec::new(), "_ipp._tcp.local.");
    assert!(!Name::equal(&lhs, 0, &other, 0));

    // Prefixes are not equal to full names.
    let shorter = pack_name(Vec::new(), "_http._tcp.");
    assert!(!Name::equal(&lhs, 0, &shorter, 0));
}

#[test]
fn test_name_equal_compressed() {
    // One side compressed, the other flat.
    let mut compressed = header(0, 0, 0, 0, 0, 0);
    compressed = pack_name(compressed, "_tcp.local.");
    let suffix_at = 12;
    let start = compressed.len();
    compressed.push(5);
    compressed = pack_bytes(compressed, b"_http");
    compressed.push(0xC0);
    compressed.push(suffix_at as u8);

    let flat = pack_name(Vec::new(), "_http._tcp.local.");
    assert!(Name::equal(&compressed, start, &flat, 0));
}

#[test]
fn test_discovery_query_bytes() {
    let packet = build_discovery_query().unwrap();
    assert_eq!(packet, DISCOVERY_PACKET);
}

#[test]
fn test_query_packet_shape() {
    let name = "_http._tcp.local.";
    let packet = build_query(7, DnsType::Ptr, name).unwrap();

    let mut h = header::Header::default();
    let off = h.unpack(&packet, 0).unwrap();
    assert_eq!(h.id, 7);
    assert_eq!(h.bits, 0);
    assert_eq!(h.questions, 1);
    assert_eq!(h.answers, 0);

    let mut qname = Name::default();
    let off = qname.unpack(&packet, off).unwrap();
    assert_eq!(qname.data, name);

    let (typ, off) = unpack_uint16(&packet, off).unwrap();
    let (class, off) = unpack_uint16(&packet, off).unwrap();
    assert_eq!(DnsType::from(typ), DnsType::Ptr);
    assert_eq!(class, CLASS_UNICAST_RESPONSE | DNSCLASS_INET.0);
    assert_eq!(off, packet.len());
    // Header + type + class is 16 octets, the name one more than its
    // presentation form: the advertised 17 + name minimum capacity.
    assert_eq!(packet.len(), 17 + name.len());
}

// Builds a discovery reply echoing the service enumeration question, with
// one PTR answer whose owner name is a pointer back to the question.
fn discovery_reply(bits: u16, target: &str) -> Vec<u8> {
    let mut msg = header(0, bits, 1, 1, 0, 0);
    msg = pack_name(msg, SERVICES_QUERY_NAME);
    msg = pack_uint16(msg, DnsType::Ptr as u16);
    msg = pack_uint16(msg, DNSCLASS_INET.0);
    let rdata = pack_name(Vec::new(), target);
    pack_record(msg, &[0xC0, 0x0C], DnsType::Ptr as u16, 120, &rdata)
}

#[test]
fn test_discovery_reply_round_trip() {
    let msg = discovery_reply(DISCOVERY_RESPONSE_BITS, "_http._tcp.local.");
    let parsed = Message::unpack_discovery(&msg, false).unwrap();

    assert_eq!(parsed.answer.len(), 1);
    assert_eq!(parsed.answer.ptr_records[0].name, "_http._tcp.local.");
    assert_eq!(parsed.answer.ptr_records[0].header.ttl, 120);
    assert!(parsed.authority.is_empty());
    assert!(parsed.additional.is_empty());
}

#[test]
fn test_discovery_reply_wrong_flags() {
    // A plain response without AA is not a discovery reply.
    let msg = discovery_reply(0x8000, "_http._tcp.local.");
    assert_eq!(
        Message::unpack_discovery(&msg, false).unwrap_err(),
        shared::error::Error::ErrNotOurReply
    );
}

#[test]
fn test_discovery_reply_nonzero_id() {
    let mut msg = discovery_reply(DISCOVERY_RESPONSE_BITS, "_http._tcp.local.");
    msg[1] = 0x42;
    assert_eq!(
        Message::unpack_discovery(&msg, false).unwrap_err(),
        shared::error::Error::ErrNotOurReply
    );
}

#[test]
fn test_discovery_reply_wrong_question() {
    let mut msg = header(0, DISCOVERY_RESPONSE_BITS, 1, 0, 0, 0);
    msg = pack_name(msg, "_services._dns-sd._tcp.local.");
    msg = pack_uint16(msg, DnsType::Ptr as u16);
    msg = pack_uint16(msg, DNSCLASS_INET.0);
    assert_eq!(
        Message::unpack_discovery(&msg, false).unwrap_err(),
        shared::error::Error::ErrQuestionMismatch
    );
}

#[test]
fn test_discovery_reply_wrong_question_type() {
    let mut msg = header(0, DISCOVERY_RESPONSE_BITS, 1, 0, 0, 0);
    msg = pack_name(msg, SERVICES_QUERY_NAME);
    msg = pack_uint16(msg, DnsType::Txt as u16);
    msg = pack_uint16(msg, DNSCLASS_INET.0);
    assert_eq!(
        Message::unpack_discovery(&msg, false).unwrap_err(),
        shared::error::Error::ErrQuestionMismatch
    );
}

#[test]
fn test_discovery_reply_question_cache_flush_class() {
    // The top class bit is protocol noise and must be masked before the
    // IN comparison.
    let mut msg = header(0, DISCOVERY_RESPONSE_BITS, 1, 0, 0, 0);
    msg = pack_name(msg, SERVICES_QUERY_NAME);
    msg = pack_uint16(msg, DnsType::Ptr as u16);
    msg = pack_uint16(msg, CLASS_UNICAST_RESPONSE | DNSCLASS_INET.0);
    assert!(Message::unpack_discovery(&msg, false).is_ok());
}

#[test]
fn test_discovery_reply_no_question() {
    let mut msg = header(0, DISCOVERY_RESPONSE_BITS, 0, 1, 0, 0);
    let rdata = pack_name(Vec::new(), "_ipp._tcp.local.");
    msg = pack_record(msg, &pack_name(Vec::new(), SERVICES_QUERY_NAME), DnsType::Ptr as u16, 120, &rdata);
    let parsed = Message::unpack_discovery(&msg, false).unwrap();
    assert_eq!(parsed.answer.ptr_records[0].name, "_ipp._tcp.local.");
}

#[test]
fn test_discovery_reply_too_many_questions() {
    let msg = header(0, DISCOVERY_RESPONSE_BITS, 2, 0, 0, 0);
    assert_eq!(
        Message::unpack_discovery(&msg, false).unwrap_err(),
        shared::error::Error::ErrTooManyQuestions
    );
}

// Builds a query reply with the given id and one answer record.
fn query_reply(id: u16, owner: &str, typ: u16, rdata: &[u8]) -> Vec<u8> {
    let mut msg = header(id, DISCOVERY_RESPONSE_BITS, 1, 1, 0, 0);
    msg = pack_name(msg, owner);
    msg = pack_uint16(msg, DnsType::Ptr as u16);
    msg = pack_uint16(msg, DNSCLASS_INET.0);
    let owner_wire = pack_name(Vec::new(), owner);
    pack_record(msg, &owner_wire, typ, 4500, rdata)
}

#[test]
fn test_query_reply_transaction_match() {
    let rdata = pack_name(Vec::new(), "printer._http._tcp.local.");
    let msg = query_reply(0x0001, "_http._tcp.local.", DnsType::Ptr as u16, &rdata);

    let parsed = Message::unpack_query(&msg, 0x0001, false).unwrap();
    assert_eq!(parsed.answer.ptr_records.len(), 1);
    assert_eq!(
        parsed.answer.ptr_records[0].name,
        "printer._http._tcp.local."
    );
}

#[test]
fn test_query_reply_transaction_mismatch() {
    let rdata = pack_name(Vec::new(), "printer._http._tcp.local.");
    let msg = query_reply(0x9999, "_http._tcp.local.", DnsType::Ptr as u16, &rdata);

    assert_eq!(
        Message::unpack_query(&msg, 0x0001, false).unwrap_err(),
        shared::error::Error::ErrTransactionIdMismatch
    );
}

#[test]
fn test_query_reply_flags_not_checked() {
    // Responders disagree about flags on unicast-preferred replies; only
    // the transaction id gates acceptance.
    let rdata = pack_name(Vec::new(), "printer._http._tcp.local.");
    let mut msg = query_reply(0x0001, "_http._tcp.local.", DnsType::Ptr as u16, &rdata);
    msg[2] = 0x00;
    msg[3] = 0x00;
    assert!(Message::unpack_query(&msg, 0x0001, false).is_ok());
}

#[test]
fn test_srv_record() {
    let mut rdata = pack_uint16(Vec::new(), 10);
    rdata = pack_uint16(rdata, 5);
    rdata = pack_uint16(rdata, 80);
    rdata = pack_name(rdata, "host.local.");

    let msg = query_reply(1, "web._http._tcp.local.", DnsType::Srv as u16, &rdata);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();

    assert_eq!(parsed.answer.srv_records.len(), 1);
    let srv = &parsed.answer.srv_records[0];
    assert_eq!(srv.priority, 10);
    assert_eq!(srv.weight, 5);
    assert_eq!(srv.port, 80);
    assert_eq!(srv.target, "host.local.");
    assert_eq!(srv.header.typ, DnsType::Srv);
}

#[test]
fn test_srv_record_too_short() {
    let rdata = pack_uint16(Vec::new(), 10);
    let msg = query_reply(1, "web._http._tcp.local.", DnsType::Srv as u16, &rdata);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();
    assert!(parsed.answer.is_empty());
}

#[test]
fn test_txt_record_multi_key() {
    let mut rdata = vec![9u8];
    rdata.extend_from_slice(b"path=/foo");
    rdata.push(7);
    rdata.extend_from_slice(b"v=1.2.3");
    rdata.push(4);
    rdata.extend_from_slice(b"bool");

    let msg = query_reply(1, "web._http._tcp.local.", DnsType::Txt as u16, &rdata);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();

    assert_eq!(parsed.answer.txt_records.len(), 1);
    assert_eq!(
        parsed.answer.txt_records[0].entries,
        vec![
            TxtEntry {
                key: "path".to_owned(),
                value: "/foo".to_owned(),
            },
            TxtEntry {
                key: "v".to_owned(),
                value: "1.2.3".to_owned(),
            },
        ]
    );
}

#[test]
fn test_txt_record_rules() {
    // Non-printable byte before the separator invalidates the string; an
    // empty key is skipped; an empty value is kept.
    let mut rdata = vec![6u8];
    rdata.extend_from_slice(&[b'a', 0x01, b'=', b'x', b'y', b'z']);
    rdata.push(2);
    rdata.extend_from_slice(b"=x");
    rdata.push(4);
    rdata.extend_from_slice(b"key=");

    let msg = query_reply(1, "web._http._tcp.local.", DnsType::Txt as u16, &rdata);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();

    assert_eq!(
        parsed.answer.txt_records[0].entries,
        vec![TxtEntry {
            key: "key".to_owned(),
            value: String::new(),
        }]
    );
}

#[test]
fn test_address_records() {
    let msg = query_reply(1, "host.local.", DnsType::A as u16, &[192, 168, 1, 4]);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();
    assert_eq!(parsed.answer.a_records.len(), 1);
    assert_eq!(
        parsed.answer.a_records[0].address.to_string(),
        "192.168.1.4"
    );

    let mut v6 = [0u8; 16];
    v6[0] = 0xfe;
    v6[1] = 0x80;
    v6[15] = 0x01;
    let msg = query_reply(1, "host.local.", DnsType::Aaaa as u16, &v6);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();
    assert_eq!(parsed.answer.aaaa_records.len(), 1);
    assert_eq!(
        parsed.answer.aaaa_records[0].address.to_string(),
        "fe80::1"
    );
}

#[test]
fn test_address_record_bad_length_dropped() {
    let msg = query_reply(1, "host.local.", DnsType::A as u16, &[192, 168, 1]);
    let parsed = Message::unpack_query(&msg, 1, false).unwrap();
    assert!(parsed.answer.is_empty());
}

#[test]
fn test_unknown_record_type_skipped() {
    // A TYPE 47 record followed by an A record: the unknown one is passed
    // over positionally, the A record still lands.
    let mut msg = header(1, DISCOVERY_RESPONSE_BITS, 0, 2, 0, 0);
    let owner = pack_name(Vec::new(), "host.local.");
    msg = pack_record(msg, &owner, 47, 120, &[1, 2, 3, 4, 5]);
    msg = pack_record(msg, &owner, DnsType::A as u16, 120, &[10, 0, 0, 2]);

    let parsed = Message::unpack_query(&msg, 1, false).unwrap();
    assert_eq!(parsed.answer.len(), 1);
    assert_eq!(parsed.answer.a_records[0].address.to_string(), "10.0.0.2");
}

#[test]
fn test_sections_routed() {
    let mut msg = header(1, DISCOVERY_RESPONSE_BITS, 0, 1, 1, 1);
    let owner = pack_name(Vec::new(), "host.local.");
    let ptr_rdata = pack_name(Vec::new(), "a.local.");
    msg = pack_record(msg, &owner, DnsType::Ptr as u16, 120, &ptr_rdata);
    msg = pack_record(msg, &owner, DnsType::A as u16, 120, &[10, 0, 0, 1]);
    let mut txt_rdata = vec![3u8];
    txt_rdata.extend_from_slice(b"a=b");
    msg = pack_record(msg, &owner, DnsType::Txt as u16, 120, &txt_rdata);

    let parsed = Message::unpack_query(&msg, 1, false).unwrap();
    assert_eq!(parsed.answer.ptr_records.len(), 1);
    assert_eq!(parsed.authority.a_records.len(), 1);
    assert_eq!(parsed.additional.txt_records.len(), 1);
}

#[test]
fn test_rdata_overruns_packet() {
    let mut msg = header(1, DISCOVERY_RESPONSE_BITS, 0, 1, 0, 0);
    let owner = pack_name(Vec::new(), "host.local.");
    msg = pack_bytes(msg, &owner);
    msg = pack_uint16(msg, DnsType::A as u16);
    msg = pack_uint16(msg, DNSCLASS_INET.0);
    msg = pack_uint32(msg, 120);
    msg = pack_uint16(msg, 200); // claims far more rdata than exists
    msg = pack_bytes(msg, &[1, 2, 3, 4]);

    assert!(Message::unpack_query(&msg, 1, false).is_err());
}

#[test]
fn test_compression_equivalence() {
    // The same answer set, once with back-pointers, once fully expanded,
    // decodes to the same records.
    let owner = "web._http._tcp.local.";
    let target = "host.local.";

    let mut srv_rdata = pack_uint16(Vec::new(), 1);
    srv_rdata = pack_uint16(srv_rdata, 2);
    srv_rdata = pack_uint16(srv_rdata, 8080);
    srv_rdata = pack_name(srv_rdata, target);

    let mut expanded = header(1, DISCOVERY_RESPONSE_BITS, 0, 2, 0, 0);
    let owner_wire = pack_name(Vec::new(), owner);
    expanded = pack_record(expanded, &owner_wire, DnsType::Srv as u16, 120, &srv_rdata);
    let ptr_rdata = pack_name(Vec::new(), owner);
    expanded = pack_record(expanded, &owner_wire, DnsType::Ptr as u16, 120, &ptr_rdata);

    // Compressed: second owner and the PTR target point at the first owner
    // name, which starts right after the header.
    let mut compressed = header(1, DISCOVERY_RESPONSE_BITS, 0, 2, 0, 0);
    compressed = pack_record(compressed, &owner_wire, DnsType::Srv as u16, 120, &srv_rdata);
    compressed = pack_record(compressed, &[0xC0, 0x0C], DnsType::Ptr as u16, 120, &[0xC0, 0x0C]);

    let a = Message::unpack_query(&expanded, 1, false).unwrap();
    let b = Message::unpack_query(&compressed, 1, false).unwrap();

    assert_eq!(a.answer.srv_records, b.answer.srv_records);
    assert_eq!(a.answer.ptr_records.len(), b.answer.ptr_records.len());
    assert_eq!(a.answer.ptr_records[0].name, b.answer.ptr_records[0].name);
    assert_eq!(b.answer.ptr_records[0].name, owner);
}

// A tiny xorshift generator keeps the adversarial input test deterministic.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

#[test]
fn test_decoder_is_total() {
    // Decoding arbitrary bytes must terminate without panicking, whatever
    // it returns. Mix of pure noise and mutations of a valid reply.
    let mut rng = XorShift(0x2545_F491_4F6C_DD1D);
    let valid = discovery_reply(DISCOVERY_RESPONSE_BITS, "_http._tcp.local.");

    for round in 0..4000 {
        let buf = if round % 2 == 0 {
            let len = (rng.next() % 320) as usize;
            (0..len).map(|_| rng.next() as u8).collect::<Vec<u8>>()
        } else {
            let mut buf = valid.clone();
            for _ in 0..1 + rng.next() % 8 {
                let pos = (rng.next() as usize) % buf.len();
                buf[pos] = rng.next() as u8;
            }
            buf
        };

        let _ = Message::unpack_discovery(&buf, false);
        let _ = Message::unpack_query(&buf, 1, false);
        let _ = Message::unpack_query(&buf, 1, true);
    }
}

#[test]
fn test_hostile_pointer_chains() {
    // Dense pointer graphs that an unbounded decoder would chase forever.
    let mut msg = header(0, 0, 0, 0, 0, 0);
    for i in 0..64u8 {
        msg.push(0xC0);
        // Each pointer targets another pointer in the same block.
        msg.push(12 + ((i as usize * 2 + 2) % 128) as u8);
    }
    for off in (12..msg.len()).step_by(2) {
        let mut name = Name::default();
        assert!(name.unpack(&msg, off).is_err(), "offset {off} must fail");
    }
}
