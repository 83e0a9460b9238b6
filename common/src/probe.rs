//! # Probe Model
//!
//! The request and result values exchanged with the reachability prober.
//!
//! A [`ProbeRequest`] is built fresh for every call and a [`ProbeResult`] is
//! returned exactly once per request. Neither is persisted.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub mod input;

pub use input::{ConnectionTestInput, PortInput};

/// A single host/port pair to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeRequest {
    pub host: IpAddr,
    pub port: u16,
}

impl ProbeRequest {
    /// Builds a request from typed values. Port `0` is rejected.
    pub fn new(host: IpAddr, port: u16) -> Result<Self, ValidationError> {
        if port == 0 {
            return Err(ValidationError::InvalidPort(port.to_string()));
        }
        Ok(Self { host, port })
    }

    /// Builds a request from the raw text a caller submits.
    pub fn parse(ip: &str, port: &str) -> Result<Self, ValidationError> {
        let host: IpAddr = input::parse_ip(ip)?;
        let port: u16 = input::parse_port(port)?;
        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Display for ProbeRequest {
    /// IPv6 hosts are bracketed (`[::1]:80`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

/// The terminal state a probe settled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    Connected,
    Failed,
    TimedOut,
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label: &str = match self {
            ProbeOutcome::Connected => "connected",
            ProbeOutcome::Failed => "failed",
            ProbeOutcome::TimedOut => "timed out",
        };
        f.write_str(label)
    }
}

/// The structured outcome of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub reachable: bool,
    pub message: String,
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn connected(request: &ProbeRequest, elapsed: Duration) -> Self {
        Self {
            reachable: true,
            message: format!("Successfully connected to instrument at {request}."),
            outcome: ProbeOutcome::Connected,
            elapsed,
        }
    }

    pub fn failed(request: &ProbeRequest, error: impl fmt::Display, elapsed: Duration) -> Self {
        Self {
            reachable: false,
            message: format!("Failed to connect to {request}. Error: {error}."),
            outcome: ProbeOutcome::Failed,
            elapsed,
        }
    }

    pub fn timed_out(request: &ProbeRequest, deadline: Duration, elapsed: Duration) -> Self {
        Self {
            reachable: false,
            message: format!(
                "Connection to {request} timed out after {} seconds.",
                format_seconds(deadline)
            ),
            outcome: ProbeOutcome::TimedOut,
            elapsed,
        }
    }
}

/// Renders a deadline as seconds, dropping a trailing `.0` (`2000ms` -> `2`, `1500ms` -> `1.5`).
pub fn format_seconds(duration: Duration) -> String {
    let millis: f64 = duration.as_millis() as f64;
    format!("{}", millis / 1000.0)
}

/// Wire shape of a probe result handed back to callers of the invocation interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestOutput {
    pub success: bool,
    pub message: String,
    pub outcome: ProbeOutcome,
    pub elapsed_ms: u64,
}

impl From<&ProbeResult> for ConnectionTestOutput {
    fn from(result: &ProbeResult) -> Self {
        Self {
            success: result.reachable,
            message: result.message.clone(),
            outcome: result.outcome,
            elapsed_ms: u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
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
