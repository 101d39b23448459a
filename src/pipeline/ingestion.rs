//! Ingest path.
//!
//! 1. Access gate (Sync only)
//! 2. Submission key resolution
//! 3. Report decoding
//! 4. Content scan (logged only)
//! 5. Idempotent store write

use crate::access::gate::{authorize, Operation};
use crate::access::principal::Principal;
use crate::security::sanitizer::scan_report;
use crate::storage::models::TestLogEntry;
use crate::storage::store::PutOutcome;
use crate::submission::key::{resolve_key, SubmissionKey};
use crate::validation::decoder::decode_report;

use super::context::RequestContext;
use super::error::IngestError;
use super::service::TestLogService;

impl TestLogService {
    /// Run the ingest path and return the stored key.
    ///
    /// # Errors
    /// Any [`IngestError`]; a duplicate key is `IngestError::Duplicate`, and
    /// nothing is written on any error.
    pub fn try_ingest(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        key_path: &str,
        body: &[u8],
    ) -> Result<SubmissionKey, IngestError> {
        let log_ctx = ctx.log_context();

        crate::log_info!(
            log_ctx,
            "INGEST_RECEIVED",
            path = key_path,
            body_size = body.len(),
            identity = principal.identity,
        );

        // [1] ACCESS GATE
        authorize(principal, Operation::Ingest, &log_ctx).into_result()?;

        // [2] SUBMISSION KEY
        let key = resolve_key(key_path, ctx.received_at, &log_ctx).map_err(|e| {
            crate::log_warn!(log_ctx, "KEY_INVALID", path = key_path, error = e);
            e
        })?;
        let log_ctx = log_ctx.with_key(&key.to_string());

        // [3] DECODE
        let decoded = decode_report(body, self.config.max_report_bytes, &log_ctx)?;

        // [4] CONTENT SCAN
        let detections = if self.config.scan_report_content {
            scan_report(&decoded.report, &log_ctx).total_detections
        } else {
            0
        };

        // [5] STORE
        let entry = TestLogEntry::new(
            key.clone(),
            decoded.report,
            ctx.received_at,
            decoded.content_hash,
        )
        .with_scan_detections(detections);
        let model = entry.model.clone();

        match self.store.put(entry) {
            Ok(PutOutcome::Stored) => {
                crate::log_info!(
                    log_ctx,
                    "INGEST_COMPLETE",
                    model = model,
                    document_size = decoded.document_size,
                    scan_detections = detections,
                );
                Ok(key)
            }
            Ok(PutOutcome::Conflict) => {
                log::info!("{} INGEST_DUPLICATE model={}", log_ctx, model);
                Err(IngestError::Duplicate(key))
            }
            Err(e) => {
                crate::log_error!(log_ctx, "STORE_WRITE_FAILED", error = e);
                Err(IngestError::Store(e))
            }
        }
    }
}
