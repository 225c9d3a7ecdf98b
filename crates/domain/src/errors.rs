use thiserror::Error;

/// Errors raised while compiling or executing checks.
///
/// `RecordParse` and `DurationFormat` are compile-time errors: they abort the
/// whole batch before any DNS exchange happens. Everything else is a per-check
/// runtime error, captured on that check's result and never interrupting the
/// remaining checks.
#[derive(Error, Debug, Clone)]
pub enum ProbeError {
    #[error("Invalid resource record '{line}': {reason}")]
    RecordParse { line: String, reason: String },

    #[error("Invalid duration '{value}': {reason}")]
    DurationFormat { value: String, reason: String },

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid query name: {0}")]
    InvalidQueryName(String),

    #[error("Invalid resolver address: {0}")]
    InvalidResolver(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Resolver returned non-success response code {rcode}")]
    ResponseCode { rcode: String },
}

impl ProbeError {
    /// True for errors that abort compilation of the whole check set.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProbeError::RecordParse { .. }
                | ProbeError::DurationFormat { .. }
                | ProbeError::InvalidRecordType(_)
        )
    }
}
