use super::{resolve_addr, DnsTransport};
use async_trait::async_trait;
use dns_sentinel_domain::{ProbeError, ResolverAddr};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

/// DNS over TCP with RFC 1035 two-byte length framing. One connection per
/// exchange; a single run never reuses a check's connection.
pub struct TcpTransport {
    resolver: ResolverAddr,
}

impl TcpTransport {
    pub fn new(resolver: ResolverAddr) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, ProbeError> {
        let server_addr = resolve_addr(&self.resolver).await?;
        let server = server_addr.to_string();

        let mut stream = tokio::time::timeout(timeout, TcpStream::connect(server_addr))
            .await
            .map_err(|_| ProbeError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(|e| ProbeError::TransportIo {
                server: server.clone(),
                reason: format!("connect failed: {e}"),
            })?;

        stream.set_nodelay(true).map_err(|e| ProbeError::TransportIo {
            server: server.clone(),
            reason: format!("failed to set TCP_NODELAY: {e}"),
        })?;

        tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| ProbeError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(|reason| ProbeError::TransportIo {
                server: server.clone(),
                reason,
            })?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| ProbeError::TransportTimeout {
                server: server.clone(),
            })?
            .map_err(|reason| ProbeError::TransportIo {
                server: server.clone(),
                reason,
            })?;

        debug!(server = %server, response_len = response_bytes.len(), "TCP response received");

        Ok(response_bytes)
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), String>
where
    S: AsyncWriteExt + Unpin,
{
    let length = message_bytes.len() as u16;
    let length_bytes = length.to_be_bytes();

    stream
        .write_all(&length_bytes)
        .await
        .map_err(|e| format!("failed to write length prefix: {e}"))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| format!("failed to write DNS message: {e}"))?;
    stream
        .flush()
        .await
        .map_err(|e| format!("failed to flush stream: {e}"))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> Result<Vec<u8>, String>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| format!("failed to read response length: {e}"))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    if response_len > MAX_TCP_MESSAGE_SIZE {
        return Err(format!(
            "response too large: {response_len} bytes (max {MAX_TCP_MESSAGE_SIZE})"
        ));
    }

    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| format!("failed to read response body: {e}"))?;

    Ok(response)
}
