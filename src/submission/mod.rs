//! Submission key module.
//!
//! Derives the canonical (timestamp, filename) identity of an ingested
//! report from the request path. The key is the uniqueness axis of the store.

pub mod key;

pub use key::*;
