//! Request context management.
//!
//! Provides per-request identity and receipt time for logging and for the
//! timestamps written into stored entries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for one inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Context with a pinned receipt time.
    pub fn at(received_at: DateTime<Utc>) -> Self {
        let request_id = format!("req-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            request_id,
            received_at,
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.request_id)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_ids_are_unique() {
        let a = RequestContext::new();
        let b = RequestContext::new();
        assert!(a.request_id.starts_with("req-"));
        assert_eq!(a.request_id.len(), 12);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_pinned_receipt_time() {
        let ts = Utc.timestamp_opt(1_523_460_528, 0).unwrap();
        let ctx = RequestContext::at(ts);
        assert_eq!(ctx.received_at, ts);
        assert_eq!(
            format!("{}", ctx.log_context()),
            format!("[req={}]", ctx.request_id)
        );
    }
}
