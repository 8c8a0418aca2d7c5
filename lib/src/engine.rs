//! Provides the scan engine capability and the typed report it produces
//!
//! The engine is the external tool doing the actual network scanning. This
//! module only describes its contract; [`nmap::NmapEngine`] is the
//! implementation backed by the `nmap` binary.

#[cfg(test)]
use mockall::automock;

use std::collections::HashMap;
use strum::{Display, EnumString};

use crate::error::Result;

/// State of a port as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PortState {
    /// Reachable and listening
    Open,
    /// Reachable but nothing listening
    Closed,
    /// Packets were dropped before reaching the port
    Filtered,
    /// Reachable, open-ness undetermined
    Unfiltered,
    /// Open or filtered, the engine could not tell
    #[strum(serialize = "open|filtered")]
    OpenFiltered,
    /// Closed or filtered, the engine could not tell
    #[strum(serialize = "closed|filtered")]
    ClosedFiltered,
    /// Any state this library does not know about
    #[strum(default)]
    Other(String),
}

/// Transport protocol a port was scanned over
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    /// TCP
    Tcp,
    /// UDP
    Udp,
    /// SCTP
    Sctp,
    /// Anything else (i.e. IP protocol scans)
    #[strum(default)]
    Other(String),
}

/// A single port entry reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePort {
    /// Port number
    pub port: u16,
    /// Reported state
    pub state: PortState,
    /// Service name, if reported
    pub name: Option<String>,
    /// Product / version string, if reported
    pub product: Option<String>,
}

/// Everything the engine reported for one host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineHost {
    /// Hostnames in reported order
    pub hostnames: Vec<String>,
    /// Ports keyed by protocol, in reported order
    pub protocols: HashMap<Protocol, Vec<EnginePort>>,
}

/// Typed result of one engine invocation, keyed by host address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineReport {
    /// Hosts the engine found to be up
    pub hosts: HashMap<String, EngineHost>,
}

#[cfg_attr(test, automock)]
/// Capability to run a scan against `hosts` with raw engine `arguments`
pub trait ScanEngine {
    /// Runs the scan synchronously and returns the parsed report
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScanError::Engine`] when the engine reports a
    /// failure and [`crate::error::ScanError::Timeout`] when it does not
    /// finish in time
    fn scan(&self, hosts: &str, arguments: &str) -> Result<EngineReport>;
}

pub mod nmap;
pub mod xml;
