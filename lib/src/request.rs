//! Validated scan requests and the scan profiles they select

use log::*;
use std::{net::Ipv4Addr, str::FromStr};
use strum::{Display, EnumString};

use crate::error::{Result, ScanError};

/// Keyword selecting a fixed port-range / timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ScanType {
    /// Fast mode: nmap's reduced list of most common ports
    Quick,
    /// Ports 1 through 1000
    Full,
}

impl ScanType {
    /// Returns the fixed engine arguments for this profile. Both profiles
    /// use the aggressive (-T4) timing template.
    pub fn arguments(&self) -> &'static str {
        match self {
            ScanType::Quick => "-F -T4",
            ScanType::Full => "-p 1-1000 -T4",
        }
    }
}

/// A single-target scan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest {
    /// IPv4 address of the host to scan
    pub target_ip: Ipv4Addr,
    /// Profile to scan the host with
    pub scan_type: ScanType,
}

impl ScanRequest {
    /// Returns a new ScanRequest from already validated parts
    pub fn new(target_ip: Ipv4Addr, scan_type: ScanType) -> Self {
        Self {
            target_ip,
            scan_type,
        }
    }

    /// Validates raw user input and builds a ScanRequest
    ///
    /// The scan type is checked first so an unknown keyword is always
    /// reported as such, whatever the target looks like. The target must be
    /// a strict dotted-decimal IPv4 address, which also keeps anything that
    /// looks like a command-line flag away from the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidScanType`] or [`ScanError::InvalidIpFormat`]
    ///
    /// # Examples
    ///
    /// ```
    /// # use r_nmaplib::request::{ScanRequest, ScanType};
    /// let req = ScanRequest::parse("10.0.0.5", "full").unwrap();
    /// assert_eq!(req.scan_type, ScanType::Full);
    /// assert!(ScanRequest::parse("-oN", "quick").is_err());
    /// ```
    pub fn parse(target_ip: &str, scan_type: &str) -> Result<Self> {
        let scan_type = ScanType::from_str(scan_type).map_err(|_| {
            debug!("rejecting scan type: {:?}", scan_type);
            ScanError::InvalidScanType
        })?;

        let target_ip = Ipv4Addr::from_str(target_ip).map_err(|e| {
            debug!("rejecting target {:?}: {}", target_ip, e);
            ScanError::InvalidIpFormat
        })?;

        Ok(Self::new(target_ip, scan_type))
    }
}

#[cfg(test)]
#[path = "./request_tests.rs"]
mod tests;
