//! Pipeline orchestration module.
//!
//! Request handling that coordinates:
//! - Access gate
//! - Submission key resolution
//! - Report decoding and content scanning
//! - Store write or scoped read
//! - Response assembly

pub mod context;
pub mod error;
pub mod ingestion;
pub mod listing;
pub mod service;

pub use context::*;
pub use error::*;
pub use service::*;
