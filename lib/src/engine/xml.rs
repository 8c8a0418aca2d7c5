//! Parser for nmap's XML (`-oX`) output
//!
//! Only the parts of the document the library uses are modelled:
//!
//! ```text
//! <nmaprun>
//!   <host>
//!     <status state="up"/>
//!     <address addr="10.0.0.5" addrtype="ipv4"/>
//!     <hostnames><hostname name="box.lan" type="PTR"/></hostnames>
//!     <ports>
//!       <port protocol="tcp" portid="80">
//!         <state state="open"/>
//!         <service name="http" product="nginx" version="1.18.0"/>
//!       </port>
//!     </ports>
//!   </host>
//!   <runstats><finished exit="success"/></runstats>
//! </nmaprun>
//! ```
//!
//! Everything else in the document is ignored.

use log::*;
use serde::Deserialize;
use std::str::FromStr;

use crate::{
    engine::{EngineHost, EnginePort, EngineReport, PortState, Protocol},
    error::{Result, ScanError},
};

#[derive(Debug, Deserialize)]
struct NmapRun {
    #[serde(rename = "host", default)]
    hosts: Vec<Host>,
    runstats: Option<RunStats>,
}

#[derive(Debug, Deserialize)]
struct RunStats {
    finished: Option<Finished>,
}

#[derive(Debug, Deserialize)]
struct Finished {
    #[serde(rename = "@exit")]
    exit: Option<String>,
    #[serde(rename = "@errormsg")]
    errormsg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Host {
    status: Option<Status>,
    #[serde(rename = "address", default)]
    addresses: Vec<Address>,
    hostnames: Option<Hostnames>,
    ports: Option<Ports>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(rename = "@state")]
    state: String,
}

#[derive(Debug, Deserialize)]
struct Address {
    #[serde(rename = "@addr")]
    addr: String,
    #[serde(rename = "@addrtype")]
    addrtype: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Hostnames {
    #[serde(rename = "hostname", default)]
    hostnames: Vec<Hostname>,
}

#[derive(Debug, Deserialize)]
struct Hostname {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct Ports {
    #[serde(rename = "port", default)]
    ports: Vec<Port>,
}

#[derive(Debug, Deserialize)]
struct Port {
    #[serde(rename = "@protocol")]
    protocol: String,
    #[serde(rename = "@portid")]
    portid: u16,
    state: PortStateElement,
    service: Option<Service>,
}

#[derive(Debug, Deserialize)]
struct PortStateElement {
    #[serde(rename = "@state")]
    state: String,
}

#[derive(Debug, Deserialize)]
struct Service {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@product")]
    product: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a complete nmap XML document into an [`EngineReport`]
///
/// Hosts whose status is not `up` are left out of the report.
///
/// # Errors
///
/// Returns [`ScanError::Engine`] when the run finished with `exit="error"`
/// and [`ScanError::Unexpected`] when the document cannot be parsed
pub fn parse(output: &str) -> Result<EngineReport> {
    let run: NmapRun = quick_xml::de::from_str(output).map_err(|e| {
        ScanError::Unexpected(format!("failed to parse nmap xml: {}", e))
    })?;

    if let Some(finished) = run.runstats.and_then(|r| r.finished) {
        if finished.exit.as_deref() == Some("error") {
            return Err(ScanError::Engine(
                non_empty(finished.errormsg).unwrap_or_else(|| {
                    "nmap run finished with an error".into()
                }),
            ));
        }
    }

    let mut report = EngineReport::default();

    for host in run.hosts {
        let state = host.status.as_ref().map(|s| s.state.as_str());

        let Some(address) = host
            .addresses
            .iter()
            .find(|a| a.addrtype.as_deref().unwrap_or("ipv4") == "ipv4")
        else {
            debug!("skipping host without an ipv4 address");
            continue;
        };

        if state != Some("up") {
            debug!("skipping host {} with status {:?}", address.addr, state);
            continue;
        }

        let entry: &mut EngineHost =
            report.hosts.entry(address.addr.clone()).or_default();

        for hostname in host.hostnames.map(|h| h.hostnames).unwrap_or_default()
        {
            if !hostname.name.is_empty()
                && !entry.hostnames.contains(&hostname.name)
            {
                entry.hostnames.push(hostname.name);
            }
        }

        for port in host.ports.map(|p| p.ports).unwrap_or_default() {
            if port.portid == 0 {
                return Err(ScanError::Unexpected(format!(
                    "invalid port {} reported for {}",
                    port.portid, address.addr
                )));
            }

            // strum's default variant makes these infallible
            let protocol = Protocol::from_str(&port.protocol)
                .map_err(|e| ScanError::Unexpected(e.to_string()))?;
            let state = PortState::from_str(&port.state.state)
                .map_err(|e| ScanError::Unexpected(e.to_string()))?;

            let (name, product) = match port.service {
                Some(service) => {
                    (non_empty(service.name), non_empty(service.product))
                }
                None => (None, None),
            };

            entry.protocols.entry(protocol).or_default().push(EnginePort {
                port: port.portid,
                state,
                name,
                product,
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "./xml_tests.rs"]
mod tests;
