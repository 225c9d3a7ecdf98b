pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use dns_sentinel_domain::{ProbeError, Protocol, ResolverAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Trait for sending one raw DNS message over the wire.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, ProbeError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, one instance per check execution. The executor
/// never shares a transport between checks, so there is no mutable client
/// state to reconfigure between exchanges.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub fn create(protocol: Protocol, resolver: ResolverAddr) -> Self {
        match protocol {
            Protocol::Udp => Transport::Udp(udp::UdpTransport::new(resolver)),
            Protocol::Tcp => Transport::Tcp(tcp::TcpTransport::new(resolver)),
        }
    }

    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, ProbeError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => DnsTransport::protocol_name(t),
            Self::Tcp(t) => DnsTransport::protocol_name(t),
        }
    }
}


/// Resolve the configured resolver address to a socket address, looking up
/// hostnames at exchange time.
pub(crate) async fn resolve_addr(resolver: &ResolverAddr) -> Result<SocketAddr, ProbeError> {
    if let Some(addr) = resolver.socket_addr() {
        return Ok(addr);
    }

    let target = resolver.to_string();
    let mut addrs = tokio::net::lookup_host(target.as_str())
        .await
        .map_err(|e| ProbeError::InvalidResolver(format!("'{target}': {e}")))?;
    addrs
        .next()
        .ok_or_else(|| ProbeError::InvalidResolver(format!("'{target}': no addresses found")))
}
