use dns_sentinel_infrastructure::parse_record;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, RData, RecordType};
use std::net::Ipv4Addr;

#[test]
fn parses_full_a_record() {
    let record = parse_record("example.com. 300 IN A 93.184.216.34").unwrap();

    assert_eq!(record.name().to_string(), "example.com.");
    assert_eq!(record.ttl(), 300);
    assert_eq!(record.dns_class(), DNSClass::IN);
    assert_eq!(record.record_type(), RecordType::A);
    assert_eq!(
        record.data(),
        &RData::A(A(Ipv4Addr::new(93, 184, 216, 34)))
    );
}

#[test]
fn ttl_defaults_to_3600() {
    let record = parse_record("example.com. IN A 1.2.3.4").unwrap();
    assert_eq!(record.ttl(), 3600);
}

#[test]
fn class_defaults_to_in() {
    let record = parse_record("example.com. 60 A 1.2.3.4").unwrap();
    assert_eq!(record.dns_class(), DNSClass::IN);
}

#[test]
fn bare_type_and_data_uses_both_defaults() {
    let record = parse_record("example.com. A 1.2.3.4").unwrap();
    assert_eq!(record.ttl(), 3600);
    assert_eq!(record.dns_class(), DNSClass::IN);
}

#[test]
fn class_and_ttl_accepted_in_either_order() {
    let a = parse_record("example.com. 300 IN A 1.2.3.4").unwrap();
    let b = parse_record("example.com. IN 300 A 1.2.3.4").unwrap();
    assert_eq!(a.ttl(), b.ttl());
    assert_eq!(a.dns_class(), b.dns_class());
}

#[test]
fn owner_name_is_normalized_to_fqdn() {
    let record = parse_record("example.com 300 IN A 1.2.3.4").unwrap();
    assert_eq!(record.name().to_string(), "example.com.");
}

#[test]
fn parses_aaaa_record() {
    let record = parse_record("example.com. 300 IN AAAA 2606:2800:220:1::1").unwrap();
    assert_eq!(record.record_type(), RecordType::AAAA);
}

#[test]
fn parses_ns_and_cname() {
    let ns = parse_record("example.com. 86400 IN NS a.iana-servers.net.").unwrap();
    assert_eq!(ns.record_type(), RecordType::NS);

    let cname = parse_record("www.example.com. 300 IN CNAME example.com.").unwrap();
    assert_eq!(cname.record_type(), RecordType::CNAME);
}

#[test]
fn parses_mx_record() {
    let record = parse_record("example.com. 3600 IN MX 10 mail.example.com.").unwrap();
    assert_eq!(record.record_type(), RecordType::MX);
}

#[test]
fn parses_quoted_txt_record() {
    let record = parse_record(r#"example.com. 300 IN TXT "v=spf1 -all""#).unwrap();
    match record.data() {
        RData::TXT(txt) => {
            let parts: Vec<String> = txt
                .txt_data()
                .iter()
                .map(|b| String::from_utf8_lossy(b).to_string())
                .collect();
            assert_eq!(parts, vec!["v=spf1 -all"]);
        }
        other => panic!("expected TXT rdata, got {other:?}"),
    }
}

#[test]
fn parses_soa_record() {
    let record = parse_record(
        "example.com. 3600 IN SOA ns.icann.org. noc.dns.icann.org. 2024013000 7200 3600 1209600 3600",
    )
    .unwrap();
    assert_eq!(record.record_type(), RecordType::SOA);

    match record.data() {
        RData::SOA(soa) => {
            assert_eq!(soa.serial(), 2024013000);
            assert_eq!(soa.refresh(), 7200);
            assert_eq!(soa.retry(), 3600);
            assert_eq!(soa.expire(), 1209600);
            assert_eq!(soa.minimum(), 3600);
        }
        other => panic!("expected SOA rdata, got {other:?}"),
    }
}

#[test]
fn rejects_non_numeric_soa_fields() {
    let result = parse_record(
        "example.com. 3600 IN SOA ns.icann.org. noc.dns.icann.org. 2024013000 weekly 3600 1209600 3600",
    );
    assert!(result.is_err());
}

#[test]
fn parses_srv_record() {
    let record =
        parse_record("_sip._tcp.example.com. 300 IN SRV 10 60 5060 sip.example.com.").unwrap();
    assert_eq!(record.record_type(), RecordType::SRV);
}

#[test]
fn rejects_malformed_records() {
    for bad in [
        "",
        "example.com.",
        "example.com. 300 IN",
        "example.com. 300 IN FROB data",
        "example.com. 300 IN A not-an-ip",
        "example.com. 300 IN A 1.2.3.4 extra",
        "example.com. 300 IN MX ten mail.example.com.",
        r#"example.com. 300 IN TXT "unterminated"#,
    ] {
        let result = parse_record(bad);
        assert!(result.is_err(), "expected failure for {bad:?}");
    }
}

#[test]
fn parse_error_names_the_offending_line() {
    let line = "example.com. 300 IN A not-an-ip";
    let err = parse_record(line).unwrap_err();
    assert!(err.to_string().contains(line));
}
