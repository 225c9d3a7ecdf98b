#![allow(dead_code)]
//! Mock DNS servers for integration tests: answer every query with a
//! configured response, echoing the query ID and question.

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Clone)]
pub struct MockResponse {
    pub rcode: ResponseCode,
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            rcode: ResponseCode::NoError,
            answers: Vec::new(),
            authority: Vec::new(),
            additionals: Vec::new(),
        }
    }
}

impl MockResponse {
    pub fn with_answers(answers: Vec<Record>) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    pub fn with_rcode(rcode: ResponseCode) -> Self {
        Self {
            rcode,
            ..Self::default()
        }
    }

    fn build(&self, query_bytes: &[u8]) -> Option<Vec<u8>> {
        let query = Message::from_vec(query_bytes).ok()?;

        let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
        response.set_recursion_desired(query.recursion_desired());
        response.set_recursion_available(true);
        response.set_response_code(self.rcode);

        for q in query.queries() {
            response.add_query(q.clone());
        }
        for record in &self.answers {
            response.add_answer(record.clone());
        }
        for record in &self.authority {
            response.add_name_server(record.clone());
        }
        for record in &self.additionals {
            response.add_additional(record.clone());
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).ok()?;
        Some(buf)
    }
}

pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Start a UDP mock resolver on an ephemeral localhost port.
    pub async fn start_udp(response: MockResponse) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(bytes) = response.build(&buf[..len]) {
                                let _ = socket.send_to(&bytes, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Start a TCP mock resolver with RFC 1035 two-byte length framing.
    pub async fn start_tcp(response: MockResponse) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let response = response.clone();

                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let len = u16::from_be_bytes(len_buf) as usize;
                            let mut query = vec![0u8; len];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }

                            if let Some(bytes) = response.build(&query) {
                                let prefix = (bytes.len() as u16).to_be_bytes();
                                let _ = stream.write_all(&prefix).await;
                                let _ = stream.write_all(&bytes).await;
                                let _ = stream.flush().await;
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
