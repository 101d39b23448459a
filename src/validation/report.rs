//! Structured test report model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Outcome of a whole report or of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Passed => "passed",
            ReportStatus::Failed => "failed",
            ReportStatus::Skipped => "skipped",
            ReportStatus::Error => "error",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passed" => Ok(ReportStatus::Passed),
            "failed" => Ok(ReportStatus::Failed),
            "skipped" => Ok(ReportStatus::Skipped),
            "error" => Ok(ReportStatus::Error),
            other => Err(format!("unknown status: {:?}", other)),
        }
    }
}

/// One named test inside a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: ReportStatus,
}

/// A validated factory test report for a single device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub serial_number: String,
    pub part_number: String,
    pub operation: Option<String>,
    pub started_at: DateTime<FixedOffset>,
    pub ended_at: DateTime<FixedOffset>,
    pub status: ReportStatus,
    pub tests: Vec<TestResult>,
}

impl TestReport {
    pub fn failed_count(&self) -> usize {
        self.tests
            .iter()
            .filter(|t| t.status == ReportStatus::Failed)
            .count()
    }
}
