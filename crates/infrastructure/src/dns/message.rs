//! DNS query construction in wire format using `hickory-proto`.

use dns_sentinel_domain::ProbeError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds recursive DNS query messages for the check executor.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Build a query for `name`/`record_type` and serialize it to wire
    /// format. Returns the message ID alongside the bytes so the response
    /// can be matched to the request.
    ///
    /// The query name is normalized to fully-qualified form, class IN, with
    /// the recursion-desired flag set.
    pub fn build(name: &str, record_type: RecordType) -> Result<(u16, Vec<u8>), ProbeError> {
        let mut name = Name::from_str(name)
            .map_err(|e| ProbeError::InvalidQueryName(format!("'{name}': {e}")))?;
        name.set_fqdn(true);

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize(&message)?;
        Ok((id, bytes))
    }

    fn serialize(message: &Message) -> Result<Vec<u8>, ProbeError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message
            .emit(&mut encoder)
            .map_err(|e| ProbeError::InvalidDnsResponse(format!("failed to encode query: {e}")))?;
        Ok(buf)
    }
}
