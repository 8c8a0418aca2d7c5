//! Library package for running nmap port scans against a single IPv4 host
//! and normalizing the result into typed records
//!
//! # Examples
//!
//! ```no_run
//! use r_nmaplib::{
//!     adapter::ScanAdapter,
//!     engine::nmap::NmapEngine,
//!     request::{ScanRequest, ScanType},
//! };
//! use std::{net::Ipv4Addr, time::Duration};
//!
//! let engine = NmapEngine::builder()
//!     .timeout(Duration::from_secs(60))
//!     .build()
//!     .unwrap();
//!
//! let adapter = ScanAdapter::new(engine);
//! let request = ScanRequest::new(Ipv4Addr::new(10, 0, 0, 5), ScanType::Full);
//!
//! println!("{}", adapter.scan(&request).to_json_pretty().unwrap());
//! ```

#![deny(missing_docs)]
pub mod adapter;
pub mod engine;
pub mod error;
pub mod request;
pub mod results;
