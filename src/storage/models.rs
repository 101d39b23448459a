//! Persisted test log records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::submission::key::SubmissionKey;
use crate::validation::report::TestReport;

/// One ingested report. Created once per successful ingestion and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLogEntry {
    pub key: SubmissionKey,
    /// Device model (the report's part number).
    pub model: String,
    pub serial_number: String,
    pub report: TestReport,
    pub received_at: DateTime<Utc>,
    /// SHA256 of the decoded report document.
    pub content_hash: String,
    /// Injection patterns found by the content scan; zero when scanning is off.
    #[serde(default)]
    pub scan_detections: usize,
}

impl TestLogEntry {
    pub fn new(
        key: SubmissionKey,
        report: TestReport,
        received_at: DateTime<Utc>,
        content_hash: String,
    ) -> Self {
        Self {
            key,
            model: report.part_number.clone(),
            serial_number: report.serial_number.clone(),
            report,
            received_at,
            content_hash,
            scan_detections: 0,
        }
    }

    pub fn with_scan_detections(mut self, detections: usize) -> Self {
        self.scan_detections = detections;
        self
    }
}
