//! # Instrument Inventory
//!
//! Instruments registered with the middleware and the connection status
//! derived from probing them.
//!
//! The inventory is a JSON array of devices:
//!
//! ```json
//! [
//!   { "id": "DEV-001", "name": "Chemistry Analyzer", "model": "Cobas C501",
//!     "ip": "192.168.1.100", "port": "5000", "connection_type": "TCP/IP Bi-directional" }
//! ]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, ValidationError};
use crate::probe::{ConnectionTestInput, PortInput, ProbeOutcome, ProbeRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub ip: String,
    pub port: PortInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
}

impl Device {
    /// Validates the device address into a probe request.
    pub fn request(&self) -> Result<ProbeRequest, ValidationError> {
        ConnectionTestInput::new(self.ip.clone(), self.port.clone()).to_request()
    }

    /// `ip:port` as written in the inventory, for display when validation fails.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

/// Connection status shown for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Connected,
    Disconnected,
    Error,
}

impl From<ProbeOutcome> for DeviceStatus {
    fn from(outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Connected => DeviceStatus::Connected,
            ProbeOutcome::Failed => DeviceStatus::Error,
            ProbeOutcome::TimedOut => DeviceStatus::Disconnected,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label: &str = match self {
            DeviceStatus::Connected => "Connected",
            DeviceStatus::Disconnected => "Disconnected",
            DeviceStatus::Error => "Error",
        };
        f.write_str(label)
    }
}

/// Parses an inventory document. Device ids must be unique.
pub fn parse_inventory(json: &str) -> Result<Vec<Device>, InventoryError> {
    let devices: Vec<Device> = serde_json::from_str(json)?;

    let mut seen: HashSet<&str> = HashSet::new();
    for device in &devices {
        if !seen.insert(device.id.as_str()) {
            return Err(InventoryError::DuplicateId(device.id.clone()));
        }
    }

    Ok(devices)
}

pub fn load_inventory(path: &Path) -> Result<Vec<Device>, InventoryError> {
    let json: String = std::fs::read_to_string(path).map_err(|source| InventoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_inventory(&json)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
