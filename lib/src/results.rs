//! Normalized scan results and their JSON representation

use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{fmt::Display, net::Ipv4Addr};

use crate::error::{Result, ScanError};

/// Service name reported when the engine does not know the service
pub const UNKNOWN_SERVICE: &str = "unknown";

/// Data structure representing a single open TCP port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortInfo {
    /// The port number i.e. 22, 80, 443 etc.
    pub port: u16,
    /// Service name, "unknown" if the engine did not report one
    pub service: String,
    /// Product string, empty if the engine did not report one
    pub product: String,
}

impl PortInfo {
    /// Returns a PortInfo applying defaults for unreported fields
    pub fn new(
        port: u16,
        service: Option<String>,
        product: Option<String>,
    ) -> Self {
        Self {
            port,
            service: service.unwrap_or_else(|| UNKNOWN_SERVICE.to_string()),
            product: product.unwrap_or_default(),
        }
    }
}

impl Display for PortInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.port, self.service)
    }
}

/// Data structure representing a host that responded to the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// IPv4 of the host
    pub ip: Ipv4Addr,
    /// Hostnames in the order the engine reported them
    pub hostnames: Vec<String>,
    /// Open TCP ports in ascending port order
    pub open_ports: Vec<PortInfo>,
}

/// Outcome of a single scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    /// The scan could not be performed or its output could not be used
    Error(ScanError),
    /// The engine did not report the target at all
    HostDown {
        /// IPv4 of the host
        ip: Ipv4Addr,
        /// Human readable explanation
        message: String,
    },
    /// The host is up
    HostUp(HostInfo),
}

impl ScanResult {
    /// Returns a HostDown result with the standard message for `ip`
    pub fn host_down(ip: Ipv4Addr) -> Self {
        Self::HostDown {
            ip,
            message: format!("Host {} appears to be down.", ip),
        }
    }

    /// Returns the error if this result is [`ScanResult::Error`]
    pub fn error(&self) -> Option<&ScanError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Pretty-printed JSON document for this result
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::Unexpected(e.to_string()))
    }
}

impl From<ScanError> for ScanResult {
    fn from(value: ScanError) -> Self {
        Self::Error(value)
    }
}

// Shapes:
//   {"error": "..."}
//   {"status": "down", "message": "..."}
//   {"status": "up", "ip": "...", "hostnames": [...], "open_ports": [...]}
impl Serialize for ScanResult {
    fn serialize<S>(&self, s: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Error(e) => {
                let mut map = s.serialize_map(Some(1))?;
                map.serialize_entry("error", &e.to_string())?;
                map.end()
            }
            Self::HostDown { message, .. } => {
                let mut map = s.serialize_map(Some(2))?;
                map.serialize_entry("status", "down")?;
                map.serialize_entry("message", message)?;
                map.end()
            }
            Self::HostUp(host) => {
                let mut map = s.serialize_map(Some(4))?;
                map.serialize_entry("status", "up")?;
                map.serialize_entry("ip", &host.ip.to_string())?;
                map.serialize_entry("hostnames", &host.hostnames)?;
                map.serialize_entry("open_ports", &host.open_ports)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
#[path = "./results_tests.rs"]
mod tests;
