use mockall::mock;
use r_nmaplib::engine::{
    EngineHost, EnginePort, EngineReport, PortState, Protocol,
};
use std::collections::HashMap;

use super::*;

mock! {
    Engine{}
    impl ScanEngine for Engine {
        fn scan(
            &self,
            hosts: &str,
            arguments: &str,
        ) -> r_nmaplib::error::Result<EngineReport>;
    }
}

fn args(target_ip: Option<&str>, scan_type: Option<&str>) -> Args {
    Args {
        target_ip: target_ip.map(str::to_string),
        scan_type: scan_type.map(str::to_string),
        timeout: Duration::from_secs(300),
        nmap: PathBuf::from("nmap"),
        quiet: false,
        debug: false,
    }
}

#[test]
fn initializes_logger() {
    initialize_logger(&args(None, None)).unwrap();
}

#[test]
fn prints_args() {
    print_args(&args(Some("10.0.0.5"), Some("full")));
}

#[test]
fn parses_positionals_and_defaults() {
    let parsed = Args::try_parse_from(["r-nmapcli", "10.0.0.5", "quick"]).unwrap();

    assert_eq!(parsed.target_ip.as_deref(), Some("10.0.0.5"));
    assert_eq!(parsed.scan_type.as_deref(), Some("quick"));
    assert_eq!(parsed.timeout, Duration::from_secs(300));
    assert_eq!(parsed.nmap, PathBuf::from("nmap"));
    assert!(!parsed.quiet);
    assert!(!parsed.debug);
}

#[test]
fn parses_options() {
    let parsed = Args::try_parse_from([
        "r-nmapcli",
        "--timeout",
        "90s",
        "--nmap",
        "/usr/local/bin/nmap",
        "--debug",
        "10.0.0.5",
        "full",
    ])
    .unwrap();

    assert_eq!(parsed.timeout, Duration::from_secs(90));
    assert_eq!(parsed.nmap, PathBuf::from("/usr/local/bin/nmap"));
    assert!(parsed.debug);
}

#[test]
fn accepts_missing_positionals() {
    let parsed = Args::try_parse_from(["r-nmapcli", "10.0.0.5"]).unwrap();
    assert_eq!(parsed.target_ip.as_deref(), Some("10.0.0.5"));
    assert!(parsed.scan_type.is_none());
}

#[test]
fn passes_flag_like_target_through_to_validation() {
    let parsed = Args::try_parse_from(["r-nmapcli", "-oN", "quick"]).unwrap();
    assert_eq!(parsed.target_ip.as_deref(), Some("-oN"));
}

#[test]
fn rejects_malformed_timeout() {
    assert!(
        Args::try_parse_from(["r-nmapcli", "--timeout", "soon", "10.0.0.5"])
            .is_err()
    );
}

#[test]
fn builds_engine_from_args() {
    let mut a = args(None, None);
    a.timeout = Duration::from_secs(42);

    let engine = build_engine(&a).unwrap();

    assert_eq!(engine.timeout(), Duration::from_secs(42));
}

#[test]
fn exits_with_usage_error_when_arguments_missing() {
    for a in [
        args(None, None),
        args(Some("10.0.0.5"), None),
        args(None, Some("quick")),
    ] {
        let mut engine = MockEngine::new();
        engine.expect_scan().never();

        let adapter = ScanAdapter::new(engine);

        let (result, code) = run(&a, &adapter);

        assert_eq!(code, 1);
        assert_eq!(
            result.to_json_pretty().unwrap(),
            "{\n  \"error\": \"Missing arguments. Usage: r-nmapcli <IP> <TYPE>\"\n}"
        );
    }
}

#[test]
fn exits_successfully_for_invalid_ip() {
    let mut engine = MockEngine::new();
    engine.expect_scan().never();

    let adapter = ScanAdapter::new(engine);

    let (result, code) = run(&args(Some("10.0.0"), Some("quick")), &adapter);

    assert_eq!(code, 0);
    assert_eq!(result, ScanResult::Error(ScanError::InvalidIpFormat));
}

#[test]
fn exits_successfully_for_invalid_scan_type() {
    let mut engine = MockEngine::new();
    engine.expect_scan().never();

    let adapter = ScanAdapter::new(engine);

    let (result, code) = run(&args(Some("10.0.0.5"), Some("slow")), &adapter);

    assert_eq!(code, 0);
    assert_eq!(result, ScanResult::Error(ScanError::InvalidScanType));
}

#[test]
fn runs_scan_and_prints_result() {
    let mut engine = MockEngine::new();

    engine.expect_scan().times(1).returning(|_, _| {
        Ok(EngineReport {
            hosts: HashMap::from([(
                "10.0.0.5".to_string(),
                EngineHost {
                    hostnames: vec![],
                    protocols: HashMap::from([(
                        Protocol::Tcp,
                        vec![EnginePort {
                            port: 22,
                            state: PortState::Open,
                            name: Some("ssh".to_string()),
                            product: None,
                        }],
                    )]),
                },
            )]),
        })
    });

    let adapter = ScanAdapter::new(engine);

    let (result, code) = run(&args(Some("10.0.0.5"), Some("full")), &adapter);

    assert_eq!(code, 0);
    assert!(matches!(result, ScanResult::HostUp(_)));

    print_result(&result).unwrap();
}

#[test]
fn exits_successfully_for_engine_errors() {
    let mut engine = MockEngine::new();

    engine.expect_scan().returning(|_, _| {
        Err(ScanError::Engine("nmap program was not found in path".into()))
    });

    let adapter = ScanAdapter::new(engine);

    let (result, code) = run(&args(Some("10.0.0.5"), Some("quick")), &adapter);

    assert_eq!(code, 0);
    assert_eq!(
        result.to_json_pretty().unwrap(),
        "{\n  \"error\": \"Nmap Error: nmap program was not found in path\"\n}"
    );
}
