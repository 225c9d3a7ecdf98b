//! Check execution: one DNS exchange per compiled check, sequentially.

use crate::dns::check::CheckDefinition;
use crate::dns::message::QueryBuilder;
use crate::dns::result::CheckResult;
use crate::dns::transport::Transport;
use chrono::Utc;
use dns_sentinel_domain::{ProbeError, ResolverAddr};
use hickory_proto::op::{Message, ResponseCode};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs a compiled check set and collects one result per check.
pub struct Checker {
    checks: BTreeMap<String, CheckDefinition>,
}

impl Checker {
    pub fn new(checks: BTreeMap<String, CheckDefinition>) -> Self {
        Self { checks }
    }

    pub fn checks(&self) -> &BTreeMap<String, CheckDefinition> {
        &self.checks
    }

    /// Run every check once, in name order. A failing check never aborts
    /// the batch; every check yields exactly one result.
    pub async fn run(&self) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(self.checks.len());

        for (name, check) in &self.checks {
            debug!(
                check = %name,
                resolver = %check.resolver,
                proto = %check.proto,
                resolve = %check.resolve,
                "running check"
            );

            let timestamp = Utc::now();
            let started = Instant::now();
            let exchange = self.exchange(check).await;
            let rtt = started.elapsed();

            let result = match exchange {
                Err(error) => {
                    warn!(check = %name, error = %error, "exchange failed");
                    CheckResult::failed(name.clone(), timestamp, rtt, error, None, check.clone())
                }
                Ok(response) if response.response_code() != ResponseCode::NoError => {
                    let rcode = rcode_to_status(response.response_code());
                    warn!(check = %name, rcode, "resolver returned non-success response code");
                    CheckResult::failed(
                        name.clone(),
                        timestamp,
                        rtt,
                        ProbeError::ResponseCode {
                            rcode: rcode.to_string(),
                        },
                        Some(response),
                        check.clone(),
                    )
                }
                Ok(response) => {
                    let as_expected = check.expect.verify_message(&check.matcher(), &response);
                    debug!(check = %name, as_expected, rtt = ?rtt, "check verified");
                    CheckResult::verified(
                        name.clone(),
                        timestamp,
                        rtt,
                        as_expected,
                        response,
                        check.clone(),
                    )
                }
            };

            results.push(result);
        }

        results
    }

    /// One query/response round trip with the check's transport and timeout.
    async fn exchange(&self, check: &CheckDefinition) -> Result<Message, ProbeError> {
        let (id, query_bytes) = QueryBuilder::build(&check.resolve, check.query_type)?;
        let resolver = ResolverAddr::parse(&check.resolver)?;
        let transport = Transport::create(check.proto, resolver);

        debug!(
            transport = transport.protocol_name(),
            query_id = id,
            "sending query"
        );

        let response_bytes = transport
            .send(&query_bytes, check.resolver_timeout)
            .await?;

        let response = Message::from_vec(&response_bytes)
            .map_err(|e| ProbeError::InvalidDnsResponse(format!("failed to parse response: {e}")))?;

        if response.id() != id {
            return Err(ProbeError::InvalidDnsResponse(format!(
                "response ID {} does not match query ID {id}",
                response.id()
            )));
        }

        Ok(response)
    }
}

pub(crate) fn rcode_to_status(rcode: ResponseCode) -> &'static str {
    match rcode {
        ResponseCode::NoError => "NOERROR",
        ResponseCode::NXDomain => "NXDOMAIN",
        ResponseCode::ServFail => "SERVFAIL",
        ResponseCode::Refused => "REFUSED",
        ResponseCode::NotImp => "NOTIMP",
        ResponseCode::FormErr => "FORMERR",
        _ => "UNKNOWN",
    }
}
