//! Security scanning for decoded test reports.
//!
//! Report text ends up in operator dashboards and in SQL-backed stores, so
//! the scan looks for markup, SQL and path payloads in the fields a report
//! carries: serial number, part number, operation and test names.

use lazy_static::lazy_static;
use regex::Regex;

use crate::logging::structured::LogContext;
use crate::validation::report::TestReport;

/// Size limit for any single text field.
pub const MAX_FIELD_SIZE: usize = 100_000; // 100KB per field

lazy_static! {
    /// XSS detection patterns
    static ref XSS_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)<script[^>]*>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)on\w+\s*=").unwrap(),
        Regex::new(r"(?i)<iframe[^>]*>").unwrap(),
        Regex::new(r"(?i)<object[^>]*>").unwrap(),
        Regex::new(r"(?i)<embed[^>]*>").unwrap(),
    ];

    /// SQL injection detection patterns
    static ref SQL_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)'\s*(or|and)\s*'?\d").unwrap(),
        Regex::new(r"(?i);\s*(drop|delete|truncate|alter)\s").unwrap(),
        Regex::new(r"(?i)union\s+(all\s+)?select").unwrap(),
        Regex::new(r"(?i)/\*.*\*/").unwrap(),
    ];

    /// Path traversal detection patterns
    static ref PATH_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\.\.[\\/]").unwrap(),
        Regex::new(r"[\\/]etc[\\/](passwd|shadow)").unwrap(),
        Regex::new(r"[\\/](proc|sys)[\\/]").unwrap(),
    ];
}

/// Security detection result.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub xss_detections: usize,
    pub sql_detections: usize,
    pub path_detections: usize,
    pub oversized_fields: usize,
    pub total_detections: usize,
}

impl ScanResult {
    pub fn has_detections(&self) -> bool {
        self.total_detections > 0
    }
}

/// Scan the text fields of a report for security patterns.
///
/// Detections are logged and counted; the report is stored as submitted so
/// the original evidence is preserved.
pub fn scan_report(report: &TestReport, ctx: &LogContext) -> ScanResult {
    log::debug!("{} SCAN_START tests={}", ctx, report.tests.len());

    let mut result = ScanResult::default();

    scan_field("serial_number", &report.serial_number, ctx, &mut result);
    scan_field("part_number", &report.part_number, ctx, &mut result);
    if let Some(operation) = &report.operation {
        scan_field("operation", operation, ctx, &mut result);
    }
    for test in &report.tests {
        scan_field("test_name", &test.name, ctx, &mut result);
    }

    if result.has_detections() {
        log::warn!(
            "{} SECURITY_DETECTIONS serial={} xss={} sql={} path={} oversized={}",
            ctx,
            report.serial_number,
            result.xss_detections,
            result.sql_detections,
            result.path_detections,
            result.oversized_fields
        );
    } else {
        log::debug!("{} SCAN_COMPLETE detections=0", ctx);
    }

    result
}

/// Scan one field for security patterns.
fn scan_field(field: &str, s: &str, ctx: &LogContext, result: &mut ScanResult) {
    if s.len() > MAX_FIELD_SIZE {
        log::debug!(
            "{} SIZE_LIMIT_EXCEEDED type=field field={} size={} limit={}",
            ctx,
            field,
            s.len(),
            MAX_FIELD_SIZE
        );
        result.oversized_fields += 1;
        result.total_detections += 1;
    }

    let groups: [(&str, &[Regex], &mut usize); 3] = [
        ("xss", XSS_PATTERNS.as_slice(), &mut result.xss_detections),
        ("sql", SQL_PATTERNS.as_slice(), &mut result.sql_detections),
        ("path", PATH_PATTERNS.as_slice(), &mut result.path_detections),
    ];

    let mut found = 0;
    for (kind, patterns, counter) in groups {
        for pattern in patterns {
            if pattern.is_match(s) {
                log::debug!(
                    "{} PATTERN_DETECTED type={} field={} pattern={}",
                    ctx,
                    kind,
                    field,
                    pattern.as_str()
                );
                *counter += 1;
                found += 1;
            }
        }
    }
    result.total_detections += found;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::report::{ReportStatus, TestResult};
    use chrono::DateTime;

    fn report(test_names: &[&str]) -> TestReport {
        let ts = DateTime::parse_from_rfc3339("2018-04-09T17:44:16+02:00").unwrap();
        TestReport {
            serial_number: "e4bf7ceb".to_string(),
            part_number: "860-00014".to_string(),
            operation: Some("Validation Test".to_string()),
            started_at: ts,
            ended_at: ts,
            status: ReportStatus::Passed,
            tests: test_names
                .iter()
                .map(|name| TestResult {
                    name: name.to_string(),
                    status: ReportStatus::Passed,
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_report() {
        let ctx = LogContext::new("test-req");
        let result = scan_report(&report(&["factory_cpu/iMX6ULL", "factory_RAM/size"]), &ctx);
        assert!(!result.has_detections());
    }

    #[test]
    fn test_xss_detection() {
        let ctx = LogContext::new("test-req");
        let result = scan_report(&report(&["<script>alert('xss')</script>"]), &ctx);
        assert_eq!(result.xss_detections, 1);
        assert!(result.has_detections());
    }

    #[test]
    fn test_sql_and_path_detection() {
        let ctx = LogContext::new("test-req");
        let result = scan_report(
            &report(&["x; DROP TABLE testlog;", "../etc/passwd"]),
            &ctx,
        );
        assert_eq!(result.sql_detections, 1);
        assert!(result.path_detections >= 1);
        assert_eq!(
            result.total_detections,
            result.sql_detections + result.path_detections
        );
    }

    #[test]
    fn test_oversized_field() {
        let ctx = LogContext::new("test-req");
        let long = "a".repeat(MAX_FIELD_SIZE + 1);
        let result = scan_report(&report(&[long.as_str()]), &ctx);
        assert_eq!(result.oversized_fields, 1);
    }
}
