//! dns-sentinel infrastructure layer: everything that touches the DNS wire
//! protocol. Record parsing, expectation verification, query building, the
//! UDP/TCP transports and the check executor live here.
pub mod dns;

pub use dns::check::{compile, CheckDefinition, DEFAULT_QUERY_TYPE, DEFAULT_TIMEOUT};
pub use dns::checker::Checker;
pub use dns::expectation::{Expectation, RecordMatcher};
pub use dns::record::parse_record;
pub use dns::result::CheckResult;
