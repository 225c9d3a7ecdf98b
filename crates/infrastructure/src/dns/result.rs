//! Per-check outcome: success flag, timing and diagnostic material.

use crate::dns::check::CheckDefinition;
use crate::dns::checker::rcode_to_status;
use chrono::{DateTime, Utc};
use hickory_proto::op::Message;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// The outcome of one check execution. Created once, never mutated.
///
/// The raw response is kept for diagnostics only and is not serialized.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,

    pub timestamp: DateTime<Utc>,

    #[serde(serialize_with = "serialize_rtt")]
    pub rtt: Duration,

    #[serde(serialize_with = "serialize_error")]
    pub error: Option<dns_sentinel_domain::ProbeError>,

    pub as_expected: bool,

    pub check: CheckDefinition,

    #[serde(skip)]
    pub response: Option<Message>,
}

impl CheckResult {
    /// Result for a check whose exchange failed or whose resolver reported a
    /// non-success response code. Verification is skipped in both cases.
    pub fn failed(
        name: String,
        timestamp: DateTime<Utc>,
        rtt: Duration,
        error: dns_sentinel_domain::ProbeError,
        response: Option<Message>,
        check: CheckDefinition,
    ) -> Self {
        Self {
            name,
            timestamp,
            rtt,
            error: Some(error),
            as_expected: false,
            check,
            response,
        }
    }

    /// Result for a completed exchange whose response was verified.
    pub fn verified(
        name: String,
        timestamp: DateTime<Utc>,
        rtt: Duration,
        as_expected: bool,
        response: Message,
        check: CheckDefinition,
    ) -> Self {
        Self {
            name,
            timestamp,
            rtt,
            error: None,
            as_expected,
            check,
            response: Some(response),
        }
    }

    /// A check is OK iff no execution error occurred and every expected
    /// record was found in its section.
    pub fn ok(&self) -> bool {
        self.error.is_none() && self.as_expected
    }

    /// One machine-parsable line per check:
    /// `<timestamp-nanoseconds>,<name>,<ok>,<round-trip-time>`.
    pub fn summary_line(&self) -> String {
        format!(
            "{},{},{},{:?}",
            self.timestamp.timestamp_nanos_opt().unwrap_or_default(),
            self.name,
            self.ok(),
            self.rtt
        )
    }

    /// Human-oriented report: metadata block plus the raw response text.
    /// Written to the error-report artifact when a check is not OK.
    pub fn render_report(&self) -> String {
        let metadata = serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("<failed to serialize metadata: {e}>"));

        let response = match &self.response {
            Some(message) => render_message(message),
            None => "<no response>".to_string(),
        };

        format!("--- Metadata:\n{metadata}\n\n--- Response:\n{response}\n")
    }
}

fn render_message(message: &Message) -> String {
    let mut out = format!(
        ";; id {} rcode {} answers {} authority {} additional {}\n",
        message.id(),
        rcode_to_status(message.response_code()),
        message.answers().len(),
        message.name_servers().len(),
        message.additionals().len(),
    );

    for (section, records) in [
        ("ANSWER", message.answers()),
        ("AUTHORITY", message.name_servers()),
        ("ADDITIONAL", message.additionals()),
    ] {
        if records.is_empty() {
            continue;
        }
        out.push_str(&format!(";; {section} SECTION:\n"));
        for record in records {
            out.push_str(&format!("{record}\n"));
        }
    }

    out
}

fn serialize_rtt<S: Serializer>(rtt: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{rtt:?}"))
}

fn serialize_error<S: Serializer>(
    error: &Option<dns_sentinel_domain::ProbeError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}
