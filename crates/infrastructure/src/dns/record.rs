//! Presentation-format resource record parsing.
//!
//! Expectation strings in the configuration use standard zone-file syntax:
//! `name [ttl] [class] type rdata...`, with TTL and class optional and
//! accepted in either order. Omitted values default to TTL 3600 and class IN.

use dns_sentinel_domain::ProbeError;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

const DEFAULT_TTL: u32 = 3600;

/// Parse a single presentation-format line into a resource record.
///
/// Fails with a `RecordParse` error naming the offending line. No side
/// effects; the caller decides whether a failure is fatal.
pub fn parse_record(line: &str) -> Result<Record, ProbeError> {
    let err = |reason: String| ProbeError::RecordParse {
        line: line.to_string(),
        reason,
    };

    let tokens = tokenize(line).map_err(|reason| err(reason))?;
    if tokens.is_empty() {
        return Err(err("empty record".to_string()));
    }

    let mut name = Name::from_str(&tokens[0]).map_err(|e| err(format!("bad owner name: {e}")))?;
    name.set_fqdn(true);

    // TTL and class may appear in either order between the name and the type.
    let mut ttl: Option<u32> = None;
    let mut class = DNSClass::IN;
    let mut idx = 1;
    while idx < tokens.len() {
        if ttl.is_none() {
            if let Ok(value) = tokens[idx].parse::<u32>() {
                ttl = Some(value);
                idx += 1;
                continue;
            }
        }
        if let Ok(parsed) = DNSClass::from_str(&tokens[idx]) {
            class = parsed;
            idx += 1;
            continue;
        }
        break;
    }

    let type_token = tokens
        .get(idx)
        .ok_or_else(|| err("missing record type".to_string()))?;
    let record_type = RecordType::from_str(type_token)
        .map_err(|_| err(format!("unknown record type '{type_token}'")))?;
    let rdata_tokens = &tokens[idx + 1..];

    let rdata = parse_rdata(record_type, rdata_tokens).map_err(|reason| err(reason))?;

    let mut record = Record::from_rdata(name, ttl.unwrap_or(DEFAULT_TTL), rdata);
    record.set_dns_class(class);
    Ok(record)
}

fn parse_rdata(record_type: RecordType, tokens: &[String]) -> Result<RData, String> {
    let expect_args = |n: usize| -> Result<(), String> {
        if tokens.len() == n {
            Ok(())
        } else {
            Err(format!(
                "{record_type} record data takes {n} field(s), got {}",
                tokens.len()
            ))
        }
    };

    match record_type {
        RecordType::A => {
            expect_args(1)?;
            let ip: Ipv4Addr = tokens[0]
                .parse()
                .map_err(|e| format!("bad IPv4 address: {e}"))?;
            Ok(RData::A(A(ip)))
        }
        RecordType::AAAA => {
            expect_args(1)?;
            let ip: Ipv6Addr = tokens[0]
                .parse()
                .map_err(|e| format!("bad IPv6 address: {e}"))?;
            Ok(RData::AAAA(AAAA(ip)))
        }
        RecordType::NS => {
            expect_args(1)?;
            Ok(RData::NS(NS(parse_name(&tokens[0])?)))
        }
        RecordType::CNAME => {
            expect_args(1)?;
            Ok(RData::CNAME(CNAME(parse_name(&tokens[0])?)))
        }
        RecordType::PTR => {
            expect_args(1)?;
            Ok(RData::PTR(PTR(parse_name(&tokens[0])?)))
        }
        RecordType::MX => {
            expect_args(2)?;
            let preference: u16 = tokens[0]
                .parse()
                .map_err(|_| format!("bad MX preference '{}'", tokens[0]))?;
            Ok(RData::MX(MX::new(preference, parse_name(&tokens[1])?)))
        }
        RecordType::TXT => {
            if tokens.is_empty() {
                return Err("TXT record data is empty".to_string());
            }
            Ok(RData::TXT(TXT::new(tokens.to_vec())))
        }
        RecordType::SRV => {
            expect_args(4)?;
            let priority: u16 = tokens[0]
                .parse()
                .map_err(|_| format!("bad SRV priority '{}'", tokens[0]))?;
            let weight: u16 = tokens[1]
                .parse()
                .map_err(|_| format!("bad SRV weight '{}'", tokens[1]))?;
            let port: u16 = tokens[2]
                .parse()
                .map_err(|_| format!("bad SRV port '{}'", tokens[2]))?;
            Ok(RData::SRV(SRV::new(
                priority,
                weight,
                port,
                parse_name(&tokens[3])?,
            )))
        }
        RecordType::SOA => {
            expect_args(7)?;
            let mname = parse_name(&tokens[0])?;
            let rname = parse_name(&tokens[1])?;
            // serial and minimum are unsigned; refresh, retry and expire are
            // signed 32-bit values per RFC 1035.
            Ok(RData::SOA(SOA::new(
                mname,
                rname,
                soa_field(&tokens[2])?,
                soa_field(&tokens[3])?,
                soa_field(&tokens[4])?,
                soa_field(&tokens[5])?,
                soa_field(&tokens[6])?,
            )))
        }
        other => Err(format!("unsupported record type '{other}'")),
    }
}

fn soa_field<T: FromStr>(token: &str) -> Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("bad SOA field '{token}'"))
}

fn parse_name(token: &str) -> Result<Name, String> {
    let mut name = Name::from_str(token).map_err(|e| format!("bad name '{token}': {e}"))?;
    name.set_fqdn(true);
    Ok(name)
}

/// Whitespace tokenizer that keeps double-quoted character-strings (as used
/// by TXT records) as single tokens, without the quotes.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                if in_quotes {
                    tokens.push(std::mem::take(&mut current));
                    in_quotes = false;
                } else {
                    if !current.is_empty() {
                        return Err("unexpected '\"' inside token".to_string());
                    }
                    in_quotes = true;
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted string".to_string());
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}
