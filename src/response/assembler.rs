//! Outcome to external result mapping.

use serde::{Deserialize, Serialize};

use crate::pipeline::error::{IngestError, ListError};
use crate::response::codes::{ErrorCode, ErrorSubcode};
use crate::storage::models::TestLogEntry;
use crate::submission::key::SubmissionKey;

pub const JSON_HEADER: &str = "application/json; charset=UTF-8";

pub const STATUS_OK: u16 = 200;
/// Every failure shares one status; clients branch on `error_code`.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Final outcome of a request, before it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ingested(SubmissionKey),
    Listed(Vec<TestLogEntry>),
    IngestFailed(IngestError),
    ListFailed(ListError),
}

impl From<Result<SubmissionKey, IngestError>> for Outcome {
    fn from(result: Result<SubmissionKey, IngestError>) -> Self {
        match result {
            Ok(key) => Outcome::Ingested(key),
            Err(e) => Outcome::IngestFailed(e),
        }
    }
}

impl From<Result<Vec<TestLogEntry>, ListError>> for Outcome {
    fn from(result: Result<Vec<TestLogEntry>, ListError>) -> Self {
        match result {
            Ok(logs) => Outcome::Listed(logs),
            Err(e) => Outcome::ListFailed(e),
        }
    }
}

/// JSON body shared by both endpoints.
///
/// `logs` is present only on a successful list, so clients can branch on
/// `success` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub success: bool,
    pub error_code: String,
    pub error_subcode: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<TestLogEntry>>,
}

impl ResponseBody {
    fn success(logs: Option<Vec<TestLogEntry>>) -> Self {
        Self {
            success: true,
            error_code: String::new(),
            error_subcode: String::new(),
            message: String::new(),
            logs,
        }
    }

    fn failure(code: ErrorCode, subcode: Option<ErrorSubcode>, message: String) -> Self {
        Self {
            success: false,
            error_code: code.as_str().to_string(),
            error_subcode: subcode.map(|s| s.as_str().to_string()).unwrap_or_default(),
            message,
            logs: None,
        }
    }
}

/// Rendered response: HTTP status plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn content_type(&self) -> &'static str {
        JSON_HEADER
    }

    /// Serialize the body.
    ///
    /// # Errors
    /// Returns the serde error if the body cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }
}

/// Map an outcome to the stable external result shape.
pub fn assemble(outcome: Outcome) -> ApiResponse {
    match outcome {
        Outcome::Ingested(_) => ApiResponse {
            status: STATUS_OK,
            body: ResponseBody::success(None),
        },
        Outcome::Listed(logs) => ApiResponse {
            status: STATUS_OK,
            body: ResponseBody::success(Some(logs)),
        },
        Outcome::IngestFailed(e) => ApiResponse {
            status: STATUS_BAD_REQUEST,
            body: ResponseBody::failure(e.error_code(), e.error_subcode(), e.to_string()),
        },
        Outcome::ListFailed(e) => ApiResponse {
            status: STATUS_BAD_REQUEST,
            body: ResponseBody::failure(e.error_code(), None, e.to_string()),
        },
    }
}

/// Parse a rendered body back into its structured form.
///
/// # Errors
/// Returns the serde error if `json` is not a response body.
pub fn parse_response(json: &str) -> Result<ResponseBody, serde_json::Error> {
    serde_json::from_str(json)
}
