//! # Caller Input
//!
//! Structural validation of the raw `{ ip, port }` pair submitted through the
//! invocation interface. The port may arrive as text or as a JSON number.
//!
//! Validation is the caller-side half of the contract: a malformed address or
//! an out-of-range port never reaches the network.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::ProbeRequest;
use crate::error::ValidationError;

/// Raw request body of a connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestInput {
    pub ip: String,
    pub port: PortInput,
}

impl ConnectionTestInput {
    pub fn new(ip: impl Into<String>, port: impl Into<PortInput>) -> Self {
        Self { ip: ip.into(), port: port.into() }
    }

    pub fn to_request(&self) -> Result<ProbeRequest, ValidationError> {
        let host: IpAddr = parse_ip(&self.ip)?;
        let port: u16 = self.port.validate()?;
        Ok(ProbeRequest { host, port })
    }
}

/// A port as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortInput {
    Number(i64),
    Text(String),
}

impl PortInput {
    pub fn validate(&self) -> Result<u16, ValidationError> {
        match self {
            PortInput::Number(n) => port_in_range(*n, &n.to_string()),
            PortInput::Text(s) => parse_port(s),
        }
    }
}

impl From<u16> for PortInput {
    fn from(port: u16) -> Self {
        PortInput::Number(i64::from(port))
    }
}

impl From<&str> for PortInput {
    fn from(port: &str) -> Self {
        PortInput::Text(port.to_string())
    }
}

impl From<String> for PortInput {
    fn from(port: String) -> Self {
        PortInput::Text(port)
    }
}

impl fmt::Display for PortInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortInput::Number(n) => write!(f, "{n}"),
            PortInput::Text(s) => f.write_str(s),
        }
    }
}

/// Parses an IPv4 or IPv6 literal. Hostnames are not resolved.
pub fn parse_ip(s: &str) -> Result<IpAddr, ValidationError> {
    s.parse::<IpAddr>()
        .map_err(|_| ValidationError::InvalidIp(s.to_string()))
}

/// Parses a decimal port in `1..=65535`. Surrounding whitespace is ignored.
pub fn parse_port(s: &str) -> Result<u16, ValidationError> {
    let n: i64 = s
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidPort(s.to_string()))?;
    port_in_range(n, s)
}

fn port_in_range(n: i64, original: &str) -> Result<u16, ValidationError> {
    if n > 0 && n < 65536 {
        // Range checked above.
        Ok(n as u16)
    } else {
        Err(ValidationError::InvalidPort(original.to_string()))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
