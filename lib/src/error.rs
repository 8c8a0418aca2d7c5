//! Custom Error and Result types for this library

use std::{any::Any, time::Duration};
use thiserror::Error;

use crate::engine::nmap::NmapEngineBuilderError;

/// Coarse classification of a [`ScanError`] so callers can branch on the
/// kind of failure without matching on message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The program was invoked without a target and scan type
    MissingArguments,
    /// The target is not a dotted-decimal IPv4 address
    InvalidIpFormat,
    /// The scan type keyword is not recognized
    InvalidScanType,
    /// The scan engine reported a failure or did not finish in time
    Engine,
    /// Any other failure while scanning or extracting results
    Unexpected,
}

/// Custom Error type for this library
///
/// The display text of each variant is the exact message reported in the
/// `error` field of the JSON output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Target and/or scan type were not supplied
    #[error("Missing arguments. Usage: {program} <IP> <TYPE>")]
    MissingArguments {
        /// Name the program was invoked as
        program: String,
    },

    /// Target could not be parsed as an IPv4 address
    #[error("Invalid IP address format")]
    InvalidIpFormat,

    /// Scan type keyword is not one of the known profiles
    #[error("Invalid scan type provided")]
    InvalidScanType,

    /// Failure reported by the scan engine itself
    #[error("Nmap Error: {0}")]
    Engine(String),

    /// Scan engine did not finish before the deadline and was killed
    #[error("Nmap Error: scan timed out after {}", humanize(.0))]
    Timeout(Duration),

    /// Catch-all for failures outside the engine
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl ScanError {
    /// Returns the [`ErrorKind`] for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArguments { .. } => ErrorKind::MissingArguments,
            Self::InvalidIpFormat => ErrorKind::InvalidIpFormat,
            Self::InvalidScanType => ErrorKind::InvalidScanType,
            Self::Engine(_) | Self::Timeout(_) => ErrorKind::Engine,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(value: std::io::Error) -> Self {
        Self::Unexpected(value.to_string())
    }
}

impl From<NmapEngineBuilderError> for ScanError {
    fn from(value: NmapEngineBuilderError) -> Self {
        Self::Unexpected(format!("failed to build nmap engine: {value}"))
    }
}

impl From<Box<dyn Any + Send>> for ScanError {
    fn from(value: Box<dyn Any + Send>) -> Self {
        if let Some(s) = value.downcast_ref::<&'static str>() {
            Self::Unexpected(format!("thread panicked with: {}", s))
        } else if let Some(s) = value.downcast_ref::<String>() {
            Self::Unexpected(format!("thread panicked with: {}", s))
        } else {
            Self::Unexpected("thread panicked with an unknown type".into())
        }
    }
}

fn humanize(duration: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*duration)
}

/// Custom Result type for this library. All Errors exposed by this library
/// will be returned as [`ScanError`]
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;
