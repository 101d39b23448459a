//! Structured logging utilities.
//!
//! Provides context-aware logging with request_id and submission key included
//! in every log message.

use std::fmt;

/// Logging context for one request.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub request_id: String,
    pub key: Option<String>,
}

impl LogContext {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            key: None,
        }
    }

    pub fn with_key(&self, key: &str) -> Self {
        Self {
            request_id: self.request_id.clone(),
            key: Some(key.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "[req={}] [key={}]", self.request_id, key),
            None => write!(f, "[req={}]", self.request_id),
        }
    }
}

/// Initialize the process-wide logger.
///
/// Safe to call repeatedly; only the first call installs the logger.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .try_init();
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("req-123");
        assert_eq!(format!("{}", ctx), "[req=req-123]");

        let ctx_with_key = ctx.with_key("1523460528_example_report.xml");
        assert_eq!(
            format!("{}", ctx_with_key),
            "[req=req-123] [key=1523460528_example_report.xml]"
        );
    }

    #[test]
    fn test_macros_accept_structured_fields() {
        let ctx = LogContext::new("req-macro");
        crate::log_info!(ctx, "MACRO_CHECK", count = 1, name = "x");
        crate::log_debug!(ctx, "MACRO_CHECK", count = 2);
        crate::log_warn!(ctx, "MACRO_CHECK", path = "a.xml", size = 3usize);
        crate::log_error!(ctx.with_key("1_a.xml"), "MACRO_CHECK", error = "down",);
    }
}
