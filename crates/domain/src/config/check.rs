use serde::{Deserialize, Serialize};

/// Raw configuration for a single check, as written in the TOML file.
///
/// Strings are kept verbatim; the check compiler turns them into a
/// ready-to-run definition (parsed records, resolved timeout, transport).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckConfig {
    /// Resolver address, e.g. "8.8.8.8:53". Bare IPs default to port 53.
    pub resolver: String,

    /// Per-check exchange timeout, e.g. "5s" or "250ms". Defaults to 5s.
    #[serde(default)]
    pub resolver_timeout: Option<String>,

    /// Name to query.
    pub resolve: String,

    /// Query over TCP instead of UDP.
    #[serde(default)]
    pub use_tcp: bool,

    /// Record type to query. Defaults to A.
    #[serde(default)]
    pub record_type: Option<String>,

    /// Require exact TTL equality when matching expected records.
    #[serde(default = "default_strict_ttl")]
    pub strict_ttl: bool,

    /// Expected records per response section, in DNS presentation format.
    #[serde(default)]
    pub expect: ExpectConfig,
}

/// Expected records per DNS message section.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ExpectConfig {
    #[serde(default)]
    pub answer_section: Vec<String>,

    #[serde(default)]
    pub authority_section: Vec<String>,

    #[serde(default)]
    pub additional_section: Vec<String>,
}

fn default_strict_ttl() -> bool {
    true
}
