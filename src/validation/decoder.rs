//! Report decoding.
//!
//! The request body is a base64-encoded XML document. Decoding is pure:
//! a failure at any step leaves nothing behind.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::logging::structured::LogContext;
use crate::validation::report::{ReportStatus, TestReport, TestResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty report")]
    Empty,

    #[error("malformed report: {0}")]
    Malformed(String),
}

/// A report together with facts about the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReport {
    pub report: TestReport,
    /// SHA256 of the decoded document, hex encoded.
    pub content_hash: String,
    /// Decoded document size in bytes.
    pub document_size: usize,
}

// Wire shape of the XML document. Every field is optional here so that
// missing data surfaces as a `Malformed` reason instead of a serde error.

#[derive(Debug, Deserialize)]
struct RawTestReport {
    uuts: Option<RawUuts>,
}

#[derive(Debug, Deserialize)]
struct RawUuts {
    #[serde(rename = "uut", default)]
    units: Vec<RawUut>,
}

#[derive(Debug, Deserialize)]
struct RawUut {
    summary: Option<RawSummary>,
    tests: Option<RawTests>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    part_number: Option<String>,
    serial_number: Option<String>,
    operation: Option<String>,
    started_at: Option<String>,
    ended_at: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTests {
    #[serde(rename = "test", default)]
    tests: Vec<RawTest>,
}

#[derive(Debug, Deserialize)]
struct RawTest {
    name: Option<String>,
    status: Option<String>,
}

/// Decode a transport-encoded report body.
///
/// ASCII whitespace anywhere in the payload is dropped before base64
/// decoding, so wrapped or CRLF-terminated payloads decode identically.
/// Padding is required: standard and URL-safe alphabets are both accepted,
/// but a payload with its trailing `=` stripped is `Malformed`, as with Go's
/// `base64.StdEncoding`.
///
/// # Errors
/// `DecodeError::Empty` for an empty or whitespace-only body;
/// `DecodeError::Malformed` for any encoding or structural failure, or a
/// decoded document larger than `max_bytes`.
pub fn decode_report(
    raw_body: &[u8],
    max_bytes: usize,
    ctx: &LogContext,
) -> Result<DecodedReport, DecodeError> {
    let normalized: Vec<u8> = raw_body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if normalized.is_empty() {
        crate::log_warn!(ctx, "REPORT_EMPTY", body_size = raw_body.len());
        return Err(DecodeError::Empty);
    }

    let document = general_purpose::STANDARD
        .decode(&normalized)
        .or_else(|standard_err| {
            general_purpose::URL_SAFE
                .decode(&normalized)
                .map_err(|_| standard_err)
        })
        .map_err(|e| {
            crate::log_warn!(ctx, "REPORT_BASE64_FAILED", error = e);
            DecodeError::Malformed(format!("base64 decode error: {}", e))
        })?;

    if document.len() > max_bytes {
        crate::log_warn!(
            ctx,
            "SIZE_LIMIT_EXCEEDED",
            size = document.len(),
            limit = max_bytes,
        );
        return Err(DecodeError::Malformed(format!(
            "report is {} bytes, limit is {}",
            document.len(),
            max_bytes
        )));
    }

    let text = std::str::from_utf8(&document)
        .map_err(|e| DecodeError::Malformed(format!("report is not UTF-8: {}", e)))?;

    let report = parse_report_xml(text).map_err(|e| {
        crate::log_warn!(ctx, "REPORT_PARSE_FAILED", error = e);
        e
    })?;

    crate::log_debug!(
        ctx,
        "REPORT_DECODED",
        serial = report.serial_number,
        part = report.part_number,
        tests = report.tests.len(),
        failed = report.failed_count(),
    );

    Ok(DecodedReport {
        report,
        content_hash: compute_hash(&document),
        document_size: document.len(),
    })
}

/// Parse and validate the XML report document.
///
/// # Errors
/// `DecodeError::Malformed` describing the first structural problem found.
pub fn parse_report_xml(text: &str) -> Result<TestReport, DecodeError> {
    let text = text.trim_start_matches('\u{feff}');

    let raw: RawTestReport = quick_xml::de::from_str(text)
        .map_err(|e| DecodeError::Malformed(format!("XML error: {}", e)))?;

    let mut units = raw.uuts.map(|u| u.units).unwrap_or_default();
    let unit = match units.len() {
        1 => units.remove(0),
        0 => return Err(malformed("no unit under test")),
        n => {
            return Err(DecodeError::Malformed(format!(
                "expected one unit under test, found {}",
                n
            )))
        }
    };

    let summary = unit.summary.ok_or_else(|| malformed("missing summary"))?;

    let serial_number = required(summary.serial_number, "serial_number")?;
    let part_number = required(summary.part_number, "part_number")?;
    let operation = summary
        .operation
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let started_at = parse_time(required(summary.started_at, "started_at")?, "started_at")?;
    let ended_at = parse_time(required(summary.ended_at, "ended_at")?, "ended_at")?;
    if ended_at < started_at {
        return Err(malformed("ended_at is before started_at"));
    }
    let status = parse_status(&required(summary.status, "status")?)?;

    let tests = unit
        .tests
        .map(|t| t.tests)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, test)| -> Result<TestResult, DecodeError> {
            let name = required(test.name, "test name")
                .map_err(|_| DecodeError::Malformed(format!("test {} has no name", i)))?;
            let status = parse_status(&required(test.status, "test status")?)?;
            Ok(TestResult { name, status })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    if tests.is_empty() {
        return Err(malformed("report has no test results"));
    }

    Ok(TestReport {
        serial_number,
        part_number,
        operation,
        started_at,
        ended_at,
        status,
        tests,
    })
}

/// Compute SHA256 hash of a decoded document.
pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

fn malformed(reason: &str) -> DecodeError {
    DecodeError::Malformed(reason.to_string())
}

fn required(value: Option<String>, field: &str) -> Result<String, DecodeError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DecodeError::Malformed(format!("missing {}", field)))
}

fn parse_time(value: String, field: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    DateTime::parse_from_rfc3339(&value)
        .map_err(|e| DecodeError::Malformed(format!("invalid {} {:?}: {}", field, value, e)))
}

fn parse_status(value: &str) -> Result<ReportStatus, DecodeError> {
    value.parse().map_err(DecodeError::Malformed)
}
