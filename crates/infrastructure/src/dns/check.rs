//! Check compilation: raw configuration into ready-to-run definitions.

use crate::dns::expectation::{Expectation, RecordMatcher};
use crate::dns::record::parse_record;
use dns_sentinel_domain::{parse_duration, CheckConfig, ExpectConfig, ProbeError, Protocol};
use hickory_proto::rr::{Record, RecordType};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Exchange timeout when a check does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Record type queried when a check does not configure one.
pub const DEFAULT_QUERY_TYPE: RecordType = RecordType::A;

/// A fully resolved check, immutable once compiled.
///
/// Carries both the parsed expectation (for verification) and the raw
/// expectation strings (for error-report serialization).
#[derive(Debug, Clone, Serialize)]
pub struct CheckDefinition {
    pub resolver: String,

    #[serde(serialize_with = "serialize_timeout")]
    pub resolver_timeout: Duration,

    pub proto: Protocol,

    pub resolve: String,

    #[serde(serialize_with = "serialize_record_type")]
    pub query_type: RecordType,

    pub strict_ttl: bool,

    #[serde(skip)]
    pub expect: Expectation,

    pub expect_config: ExpectConfig,
}

impl CheckDefinition {
    pub fn matcher(&self) -> RecordMatcher {
        RecordMatcher::new(self.strict_ttl)
    }
}

/// Compile raw check configurations into check definitions.
///
/// Fail-fast: the first record-parse, duration or record-type error aborts
/// the whole compilation; no partial check set is ever surfaced. The output
/// map iterates sorted by check name, fixing the execution order.
pub fn compile(
    configs: &BTreeMap<String, CheckConfig>,
) -> Result<BTreeMap<String, CheckDefinition>, ProbeError> {
    let mut checks = BTreeMap::new();

    for (name, config) in configs {
        let expect = Expectation {
            answer: parse_section(&config.expect.answer_section)?,
            authority: parse_section(&config.expect.authority_section)?,
            additional: parse_section(&config.expect.additional_section)?,
        };

        let resolver_timeout = match config.resolver_timeout.as_deref() {
            None | Some("") => DEFAULT_TIMEOUT,
            Some(value) => parse_duration(value)?,
        };

        let query_type = match config.record_type.as_deref() {
            None | Some("") => DEFAULT_QUERY_TYPE,
            Some(value) => RecordType::from_str(&value.to_uppercase())
                .map_err(|_| ProbeError::InvalidRecordType(value.to_string()))?,
        };

        checks.insert(
            name.clone(),
            CheckDefinition {
                resolver: config.resolver.clone(),
                resolver_timeout,
                proto: Protocol::from_use_tcp(config.use_tcp),
                resolve: config.resolve.clone(),
                query_type,
                strict_ttl: config.strict_ttl,
                expect,
                expect_config: config.expect.clone(),
            },
        );
    }

    Ok(checks)
}

fn parse_section(lines: &[String]) -> Result<Vec<Record>, ProbeError> {
    lines.iter().map(|line| parse_record(line)).collect()
}

fn serialize_timeout<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dns_sentinel_domain::duration::format_duration(*timeout))
}

fn serialize_record_type<S: Serializer>(
    record_type: &RecordType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&record_type.to_string())
}
