//! Provides the scan adapter that turns a request into a normalized result

use itertools::Itertools;
use log::*;
use std::collections::HashMap;

use crate::{
    engine::{EnginePort, PortState, Protocol, ScanEngine},
    request::ScanRequest,
    results::{HostInfo, PortInfo, ScanResult},
};

/// Runs scans through an injected [`ScanEngine`] and normalizes the output
///
/// # Examples
///
/// ```no_run
/// # use r_nmaplib::adapter::ScanAdapter;
/// # use r_nmaplib::engine::nmap::NmapEngine;
/// let adapter = ScanAdapter::new(NmapEngine::default());
/// let result = adapter.scan_raw("192.168.1.10", "quick");
/// println!("{}", result.to_json_pretty().unwrap());
/// ```
pub struct ScanAdapter<E: ScanEngine> {
    engine: E,
}

impl<E: ScanEngine> ScanAdapter<E> {
    /// Returns a new adapter wrapping `engine`
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Validates raw input and scans. Validation failures are returned as
    /// [`ScanResult::Error`] and the engine is never invoked for them.
    pub fn scan_raw(&self, target_ip: &str, scan_type: &str) -> ScanResult {
        match ScanRequest::parse(target_ip, scan_type) {
            Ok(request) => self.scan(&request),
            Err(e) => ScanResult::Error(e),
        }
    }

    /// Performs one blocking scan. Every failure is reported as
    /// [`ScanResult::Error`], nothing is propagated.
    pub fn scan(&self, request: &ScanRequest) -> ScanResult {
        let target = request.target_ip.to_string();
        let arguments = request.scan_type.arguments();

        info!("starting {} scan of {}", request.scan_type, target);

        let mut report = match self.engine.scan(&target, arguments) {
            Ok(report) => report,
            Err(e) => {
                error!("scan of {} failed: {}", target, e);
                return ScanResult::Error(e);
            }
        };

        let Some(host) = report.hosts.remove(&target) else {
            info!("host {} did not respond", target);
            return ScanResult::host_down(request.target_ip);
        };

        let open_ports = open_tcp_ports(host.protocols);

        debug!(
            "host {} is up with hostnames {:?} and open ports [{}]",
            target,
            host.hostnames,
            open_ports.iter().join(", ")
        );

        ScanResult::HostUp(HostInfo {
            ip: request.target_ip,
            hostnames: host.hostnames,
            open_ports,
        })
    }
}

// Only TCP ports in the open state are kept, ascending by port
fn open_tcp_ports(
    mut protocols: HashMap<Protocol, Vec<EnginePort>>,
) -> Vec<PortInfo> {
    protocols
        .remove(&Protocol::Tcp)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| p.state == PortState::Open)
        .sorted_by_key(|p| p.port)
        .dedup_by(|a, b| a.port == b.port)
        .map(|p| PortInfo::new(p.port, p.name, p.product))
        .collect()
}

#[cfg(test)]
#[path = "./adapter_tests.rs"]
mod tests;
