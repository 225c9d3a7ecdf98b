use super::{resolve_addr, DnsTransport};
use async_trait::async_trait;
use dns_sentinel_domain::{ProbeError, ResolverAddr};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP: one ephemeral socket per exchange.
pub struct UdpTransport {
    resolver: ResolverAddr,
}

impl UdpTransport {
    pub fn new(resolver: ResolverAddr) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, ProbeError> {
        let server_addr = resolve_addr(&self.resolver).await?;

        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            ProbeError::TransportIo {
                server: server_addr.to_string(),
                reason: format!("failed to bind UDP socket: {e}"),
            }
        })?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message_bytes, server_addr))
            .await
            .map_err(|_| ProbeError::TransportTimeout {
                server: server_addr.to_string(),
            })?
            .map_err(|e| ProbeError::TransportIo {
                server: server_addr.to_string(),
                reason: format!("failed to send query: {e}"),
            })?;

        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| ProbeError::TransportTimeout {
                    server: server_addr.to_string(),
                })?
                .map_err(|e| ProbeError::TransportIo {
                    server: server_addr.to_string(),
                    reason: format!("failed to receive response: {e}"),
                })?;

        if from_addr.ip() != server_addr.ip() {
            warn!(
                expected = %server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
