#![allow(dead_code)]
pub mod dns_server_mock;

pub use dns_server_mock::{MockDnsServer, MockResponse};

use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub fn a_record(name: &str, ttl: u32, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::A(A(ip)))
}

pub fn aaaa_record(name: &str, ttl: u32, ip: Ipv6Addr) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::AAAA(AAAA(ip)))
}
