//! Security module.
//!
//! Scans decoded report text for injection patterns before storage.

pub mod sanitizer;

pub use sanitizer::*;
