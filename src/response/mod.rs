//! Response assembly module.
//!
//! Maps internal outcomes to the stable external result shape
//! `{success, error_code, error_subcode, message, logs?}` and an HTTP status.
//! Error codes are closed enums internally and become strings only here.

pub mod assembler;
pub mod codes;

pub use assembler::*;
pub use codes::*;
