//! Report validation module.
//!
//! Turns the transport-encoded request body into a structured report:
//! - Whitespace normalization and base64 decoding
//! - XML parsing of the report document
//! - Structural checks (serial, part number, time range, status values)

pub mod decoder;
pub mod report;

pub use decoder::*;
pub use report::*;
