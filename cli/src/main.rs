//! CLI for running a single nmap port scan and printing the result as JSON
//!
//! # Examples
//!
//! ```bash
//! # help menu
//! r-nmapcli --help
//!
//! # fast scan of the most common ports
//! r-nmapcli 192.168.1.10 quick
//!
//! # scan ports 1-1000, giving up after 2 minutes
//! r-nmapcli --timeout 2m 10.0.0.5 full
//! ```
//!
//! Exactly one pretty-printed JSON document is written to stdout. Logs go to
//! stderr. The exit status is 0 whenever a result document is printed, error
//! documents included, and 1 when the target or scan type is missing.
use clap::Parser;
use color_eyre::eyre::Result;
use log::*;
use r_nmaplib::{
    adapter::ScanAdapter,
    engine::{
        ScanEngine,
        nmap::{DEFAULT_PROGRAM, NmapEngine},
    },
    error::ScanError,
    results::ScanResult,
};
use std::{path::PathBuf, process::ExitCode, time::Duration};

#[doc(hidden)]
const PROGRAM: &str = env!("CARGO_BIN_NAME");

#[doc(hidden)]
const USAGE_EXIT_CODE: u8 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// CLI for running a single nmap port scan and printing the result as JSON
struct Args {
    /// IPv4 address of the host to scan
    #[arg(allow_hyphen_values = true)]
    target_ip: Option<String>,

    /// Scan profile: "quick" (nmap fast mode) or "full" (ports 1-1000)
    #[arg(allow_hyphen_values = true)]
    scan_type: Option<String>,

    /// Give up on the scan after this long, i.e. 90s, 5m, 1h
    #[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Path or name of the nmap binary
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    nmap: PathBuf,

    /// Only log errors
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Prints debug logs including those from r-nmaplib
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[doc(hidden)]
fn initialize_logger(args: &Args) -> Result<()> {
    let filter = if args.quiet {
        simplelog::LevelFilter::Error
    } else if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    // stdout is reserved for the JSON document
    simplelog::TermLogger::init(
        filter,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[doc(hidden)]
fn print_args(args: &Args) {
    debug!("configuration:");
    debug!("target_ip: {:?}", args.target_ip);
    debug!("scan_type: {:?}", args.scan_type);
    debug!("timeout:   {}", humantime::format_duration(args.timeout));
    debug!("nmap:      {}", args.nmap.display());
    debug!("quiet:     {}", args.quiet);
}

#[doc(hidden)]
fn build_engine(args: &Args) -> Result<NmapEngine> {
    let engine = NmapEngine::builder()
        .program(args.nmap.clone())
        .timeout(args.timeout)
        .build()
        .map_err(ScanError::from)?;
    Ok(engine)
}

#[doc(hidden)]
fn run<E: ScanEngine>(args: &Args, adapter: &ScanAdapter<E>) -> (ScanResult, u8) {
    let (Some(target_ip), Some(scan_type)) = (&args.target_ip, &args.scan_type)
    else {
        let err = ScanError::MissingArguments {
            program: PROGRAM.to_string(),
        };
        error!("{}", err);
        return (ScanResult::Error(err), USAGE_EXIT_CODE);
    };

    let result = adapter.scan_raw(target_ip, scan_type);

    if let Some(err) = result.error() {
        debug!("scan finished with {:?}: {}", err.kind(), err);
    }

    (result, 0)
}

#[doc(hidden)]
fn print_result(result: &ScanResult) -> Result<()> {
    let j = result.to_json_pretty()?;
    println!("{}", j);
    Ok(())
}

#[doc(hidden)]
fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(&args)?;

    print_args(&args);

    let adapter = ScanAdapter::new(build_engine(&args)?);

    let (result, code) = run(&args, &adapter);

    print_result(&result)?;

    Ok(ExitCode::from(code))
}

#[cfg(test)]
#[path = "./main_tests.rs"]
mod tests;
