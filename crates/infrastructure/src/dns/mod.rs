pub mod check;
pub mod checker;
pub mod expectation;
pub mod message;
pub mod record;
pub mod result;
pub mod transport;

pub use check::{compile, CheckDefinition};
pub use checker::Checker;
pub use expectation::{Expectation, RecordMatcher};
pub use message::QueryBuilder;
pub use record::parse_record;
pub use result::CheckResult;
