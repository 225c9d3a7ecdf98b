//! Expectation verification: containment matching of expected records
//! against the records observed in a response section.

use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use tracing::debug;

/// Comparison predicate for a pair of resource records.
///
/// Records match on owner name (case-insensitive), class, type and rdata.
/// TTL equality is only required in strict mode; strict is the default so
/// expectation TTLs must mirror the resolver's answer exactly.
#[derive(Debug, Clone, Copy)]
pub struct RecordMatcher {
    pub strict_ttl: bool,
}

impl Default for RecordMatcher {
    fn default() -> Self {
        Self { strict_ttl: true }
    }
}

impl RecordMatcher {
    pub fn new(strict_ttl: bool) -> Self {
        Self { strict_ttl }
    }

    pub fn matches(&self, expected: &Record, observed: &Record) -> bool {
        expected.name() == observed.name()
            && expected.dns_class() == observed.dns_class()
            && expected.record_type() == observed.record_type()
            && expected.data() == observed.data()
            && (!self.strict_ttl || expected.ttl() == observed.ttl())
    }

    /// Containment check: every expected record must match at least one
    /// observed record. Extra observed records never cause failure, and an
    /// empty expectation is vacuously true.
    pub fn verify(&self, expected: &[Record], observed: &[Record]) -> bool {
        expected
            .iter()
            .all(|want| observed.iter().any(|have| self.matches(want, have)))
    }
}

/// The three expected record sequences of a check, one per message section.
#[derive(Debug, Clone, Default)]
pub struct Expectation {
    pub answer: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
}

impl Expectation {
    /// AND of the three per-section verifications against a response.
    pub fn verify_message(&self, matcher: &RecordMatcher, response: &Message) -> bool {
        let answer_ok = matcher.verify(&self.answer, response.answers());
        let authority_ok = matcher.verify(&self.authority, response.name_servers());
        let additional_ok = matcher.verify(&self.additional, response.additionals());

        debug!(
            answer_ok,
            authority_ok, additional_ok, "expectation sections verified"
        );

        answer_ok && authority_ok && additional_ok
    }
}
