//! dns-sentinel domain layer: configuration model, error taxonomy and the
//! small value types shared by the probe. No DNS wire types live here.
pub mod config;
pub mod duration;
pub mod errors;
pub mod protocol;
pub mod resolver_addr;

pub use config::{CheckConfig, CliOverrides, Config, ExpectConfig};
pub use duration::parse_duration;
pub use errors::ProbeError;
pub use protocol::Protocol;
pub use resolver_addr::ResolverAddr;
