use super::*;

#[test]
fn parses_quick_request() {
    let req = ScanRequest::parse("192.168.1.10", "quick").unwrap();
    assert_eq!(req.target_ip, Ipv4Addr::new(192, 168, 1, 10));
    assert_eq!(req.scan_type, ScanType::Quick);
}

#[test]
fn parses_full_request() {
    let req = ScanRequest::parse("10.0.0.5", "full").unwrap();
    assert_eq!(
        req,
        ScanRequest::new(Ipv4Addr::new(10, 0, 0, 5), ScanType::Full)
    );
}

#[test]
fn maps_scan_types_to_arguments() {
    assert_eq!(ScanType::Quick.arguments(), "-F -T4");
    assert_eq!(ScanType::Full.arguments(), "-p 1-1000 -T4");
}

#[test]
fn displays_scan_type_keyword() {
    assert_eq!(ScanType::Quick.to_string(), "quick");
    assert_eq!(ScanType::Full.to_string(), "full");
}

#[test]
fn rejects_malformed_ips() {
    let bad = [
        "",
        "localhost",
        "256.1.1.1",
        "10.0.0",
        "10.0.0.5.6",
        "10.0.0.-1",
        "-oN",
        "--script=evil",
        " 10.0.0.5",
        "::1",
    ];

    for ip in bad {
        assert_eq!(
            ScanRequest::parse(ip, "quick"),
            Err(ScanError::InvalidIpFormat),
            "expected {:?} to be rejected",
            ip
        );
    }
}

#[test]
fn rejects_unknown_scan_types() {
    for scan_type in ["", "Quick", "FULL", "stealth", "quick "] {
        assert_eq!(
            ScanRequest::parse("10.0.0.5", scan_type),
            Err(ScanError::InvalidScanType)
        );
    }
}

#[test]
fn reports_scan_type_before_ip() {
    assert_eq!(
        ScanRequest::parse("not-an-ip", "stealth"),
        Err(ScanError::InvalidScanType)
    );
}
