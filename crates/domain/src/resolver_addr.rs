use crate::errors::ProbeError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_DNS_PORT: u16 = 53;

/// A resolver address that may or may not already be an IP.
///
/// The configuration passes resolver strings through verbatim; parsing only
/// happens when the exchange is about to run. Unresolved hostnames are looked
/// up by the transport layer at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: String, port: u16 },
}

impl ResolverAddr {
    pub fn parse(input: &str) -> Result<Self, ProbeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ProbeError::InvalidResolver("empty address".to_string()));
        }

        if let Ok(addr) = input.parse::<SocketAddr>() {
            return Ok(ResolverAddr::Resolved(addr));
        }
        if let Ok(ip) = input.parse::<IpAddr>() {
            return Ok(ResolverAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }

        match input.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => {
                let port: u16 = port.parse().map_err(|_| {
                    ProbeError::InvalidResolver(format!("invalid port in '{input}'"))
                })?;
                Ok(ResolverAddr::Unresolved {
                    hostname: host.to_string(),
                    port,
                })
            }
            Some(_) => Err(ProbeError::InvalidResolver(format!(
                "missing host in '{input}'"
            ))),
            None => Ok(ResolverAddr::Unresolved {
                hostname: input.to_string(),
                port: DEFAULT_DNS_PORT,
            }),
        }
    }

    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            ResolverAddr::Resolved(addr) => Some(*addr),
            ResolverAddr::Unresolved { .. } => None,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            ResolverAddr::Resolved(addr) => addr.port(),
            ResolverAddr::Unresolved { port, .. } => *port,
        }
    }
}

impl fmt::Display for ResolverAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverAddr::Resolved(addr) => write!(f, "{}", addr),
            ResolverAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_socket_addr() {
        let addr = ResolverAddr::parse("8.8.8.8:53").unwrap();
        assert_eq!(addr.socket_addr(), Some("8.8.8.8:53".parse().unwrap()));
    }

    #[test]
    fn bare_ip_defaults_to_port_53() {
        let addr = ResolverAddr::parse("1.1.1.1").unwrap();
        assert_eq!(addr.socket_addr(), Some("1.1.1.1:53".parse().unwrap()));
    }

    #[test]
    fn ipv6_with_port() {
        let addr = ResolverAddr::parse("[2606:4700:4700::1111]:53").unwrap();
        assert!(addr.socket_addr().is_some());
    }

    #[test]
    fn hostname_stays_unresolved() {
        let addr = ResolverAddr::parse("dns.example.org:5353").unwrap();
        assert_eq!(addr.socket_addr(), None);
        assert_eq!(addr.port(), 5353);
        assert_eq!(addr.to_string(), "dns.example.org:5353");
    }

    #[test]
    fn hostname_without_port_defaults() {
        let addr = ResolverAddr::parse("dns.example.org").unwrap();
        assert_eq!(addr.port(), 53);
    }

    #[test]
    fn rejects_garbage() {
        assert!(ResolverAddr::parse("").is_err());
        assert!(ResolverAddr::parse(":53").is_err());
        assert!(ResolverAddr::parse("host:notaport").is_err());
    }
}
