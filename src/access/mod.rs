//! Access gate module.
//!
//! Decides whether a caller may perform an operation before any decoding or
//! store access happens:
//! - Ingest requires the Sync permission class
//! - List requires Standard or any elevated class
//!
//! List results are further scoped by the principal's authorized models in
//! the store, never by a separate denial.

pub mod gate;
pub mod principal;

pub use gate::*;
pub use principal::*;
