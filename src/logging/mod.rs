//! Structured logging with request context.
//!
//! Provides logging macros and utilities that include the request id and,
//! once resolved, the submission key in every log message.

pub mod structured;

pub use structured::*;
