//! The test log service.
//!
//! Holds the injected store and configuration; each call handles one request
//! independently.

use std::sync::Arc;

use crate::access::principal::Principal;
use crate::config::ServiceConfig;
use crate::response::assembler::{assemble, ApiResponse};
use crate::storage::store::TestLogStore;

use super::context::RequestContext;

pub struct TestLogService {
    pub(super) store: Arc<dyn TestLogStore>,
    pub(super) config: ServiceConfig,
}

impl TestLogService {
    pub fn new(store: Arc<dyn TestLogStore>, config: ServiceConfig) -> Self {
        log::info!(
            "SERVICE_CONFIGURED max_report_bytes={} scan_report_content={} enable_user_auth={}",
            config.max_report_bytes,
            config.scan_report_content,
            config.enable_user_auth
        );
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// `POST /api/testlog/{key}`.
    pub fn ingest(&self, principal: &Principal, key_path: &str, body: &[u8]) -> ApiResponse {
        self.ingest_with(&RequestContext::new(), principal, key_path, body)
    }

    pub fn ingest_with(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        key_path: &str,
        body: &[u8],
    ) -> ApiResponse {
        assemble(self.try_ingest(ctx, principal, key_path, body).into())
    }

    /// `GET /api/testlog`.
    pub fn list(&self, principal: &Principal) -> ApiResponse {
        self.list_with(&RequestContext::new(), principal)
    }

    pub fn list_with(&self, ctx: &RequestContext, principal: &Principal) -> ApiResponse {
        assemble(self.try_list(ctx, principal).into())
    }
}
