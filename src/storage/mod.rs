//! Storage module.
//!
//! The `TestLogStore` contract, the persisted entry model, an in-memory
//! implementation, and SQL builders for a Postgres-backed collaborator.

pub mod memory;
pub mod models;
pub mod queries;
pub mod store;

pub use memory::*;
pub use models::*;
pub use queries::*;
pub use store::*;
