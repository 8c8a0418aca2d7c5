//! Provides a ScanEngine implementation backed by the `nmap` binary

use derive_builder::Builder;
use log::*;
use std::{
    io::{ErrorKind, Read},
    path::PathBuf,
    process::{Child, Command, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    engine::{EngineReport, ScanEngine, xml},
    error::{Result, ScanError},
};

/// Binary looked up on PATH when no program is configured
pub const DEFAULT_PROGRAM: &str = "nmap";

/// Default deadline for a single scan
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

// How often the child is polled for exit while waiting on the deadline
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Data structure representing the nmap scan engine
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct NmapEngine {
    /// Path or name of the nmap binary
    #[builder(default = "PathBuf::from(DEFAULT_PROGRAM)")]
    program: PathBuf,
    /// Time allowed for one scan before the process is killed
    #[builder(default = "DEFAULT_TIMEOUT")]
    timeout: Duration,
}

impl Default for NmapEngine {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl NmapEngine {
    /// Returns a builder for NmapEngine
    pub fn builder() -> NmapEngineBuilder {
        NmapEngineBuilder::default()
    }

    /// Returns the configured scan deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // Pipes are drained on their own threads while the child is polled for
    // exit, otherwise a full pipe would stall the child until the deadline
    fn drain<R>(pipe: Option<R>) -> JoinHandle<Result<String>>
    where
        R: Read + Send + 'static,
    {
        thread::spawn(move || -> Result<String> {
            let mut buf = String::new();
            if let Some(mut pipe) = pipe {
                pipe.read_to_string(&mut buf)?;
            }
            Ok(buf)
        })
    }

    // Kills and reaps the child, then waits for the drain threads which end
    // once the child's pipes close
    fn reap(
        child: &mut Child,
        stdout: JoinHandle<Result<String>>,
        stderr: JoinHandle<Result<String>>,
    ) {
        // ignore errors here as the child may already have exited
        let _ = child.kill();
        let _ = child.wait();
        let _ = stdout.join();
        let _ = stderr.join();
    }

    fn launch_error(&self, e: std::io::Error) -> ScanError {
        if e.kind() == ErrorKind::NotFound {
            ScanError::Engine(format!(
                "nmap program was not found in path: {}",
                self.program.display()
            ))
        } else {
            ScanError::Engine(format!(
                "failed to launch {}: {}",
                self.program.display(),
                e
            ))
        }
    }
}

impl ScanEngine for NmapEngine {
    fn scan(&self, hosts: &str, arguments: &str) -> Result<EngineReport> {
        debug!(
            "running {} {} -oX - {} (timeout {})",
            self.program.display(),
            arguments,
            hosts,
            humantime::format_duration(self.timeout)
        );

        let mut child = Command::new(&self.program)
            .args(arguments.split_whitespace())
            .args(["-oX", "-"])
            .arg(hosts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        let stdout_handle = Self::drain(child.stdout.take());
        let stderr_handle = Self::drain(child.stderr.take());

        let deadline = Instant::now() + self.timeout;

        let status = loop {
            let exited = match child.try_wait() {
                Ok(exited) => exited,
                Err(e) => {
                    error!("failed to poll nmap pid {}: {}", child.id(), e);
                    Self::reap(&mut child, stdout_handle, stderr_handle);
                    return Err(e.into());
                }
            };

            if let Some(status) = exited {
                break status;
            }

            if Instant::now() >= deadline {
                warn!(
                    "nmap did not finish within {}, killing pid {}",
                    humantime::format_duration(self.timeout),
                    child.id()
                );
                Self::reap(&mut child, stdout_handle, stderr_handle);
                return Err(ScanError::Timeout(self.timeout));
            }

            thread::sleep(POLL_INTERVAL);
        };

        let stdout = stdout_handle.join()??;
        let stderr = stderr_handle.join()??;
        let stderr = stderr.trim();

        if !status.success() {
            let message = if stderr.is_empty() {
                format!("nmap exited with {}", status)
            } else {
                stderr.to_string()
            };
            return Err(ScanError::Engine(message));
        }

        if has_errors(stderr) {
            return Err(ScanError::Engine(stderr.to_string()));
        }

        if !stderr.is_empty() {
            warn!("nmap: {}", stderr);
        }

        if stdout.trim().is_empty() {
            return Err(ScanError::Engine("nmap produced no output".into()));
        }

        xml::parse(&stdout)
    }
}

// nmap reports non-fatal problems on stderr as "Warning: ..." lines, any
// other non-blank line means the scan itself failed even on exit status 0
fn has_errors(stderr: &str) -> bool {
    stderr.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.to_ascii_lowercase().starts_with("warning: ")
    })
}

#[cfg(test)]
#[path = "./nmap_tests.rs"]
mod tests;
