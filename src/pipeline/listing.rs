//! List path: access gate, then the store's scoped read.

use crate::access::gate::{authorize, Operation};
use crate::access::principal::Principal;
use crate::storage::models::TestLogEntry;

use super::context::RequestContext;
use super::error::ListError;
use super::service::TestLogService;

impl TestLogService {
    /// Entries visible to `principal`, most recent first.
    ///
    /// # Errors
    /// `ListError::Access` below Standard, `ListError::Store` on backend
    /// failure. An empty authorized model set is not an error.
    pub fn try_list(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
    ) -> Result<Vec<TestLogEntry>, ListError> {
        let log_ctx = ctx.log_context();

        authorize(principal, Operation::List, &log_ctx).into_result()?;

        let logs = self.store.list_for(principal).map_err(|e| {
            crate::log_error!(log_ctx, "STORE_READ_FAILED", error = e);
            ListError::Store(e)
        })?;

        crate::log_info!(
            log_ctx,
            "LIST_COMPLETE",
            identity = principal.identity,
            models = principal.authorized_models.len(),
            entries = logs.len(),
        );
        Ok(logs)
    }
}
