use serde::Serialize;
use std::fmt;

/// Transport used for a check's DNS exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    /// Selected by the check's `use_tcp` flag; there are no other transports.
    pub fn from_use_tcp(use_tcp: bool) -> Self {
        if use_tcp {
            Protocol::Tcp
        } else {
            Protocol::Udp
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
