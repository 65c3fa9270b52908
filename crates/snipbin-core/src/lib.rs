//! snipbin-core
//!
//! Pure domain types for the snippet service: the snippet model, the code
//! codec, expiration rules, the list query builder and object key layout.
//! No I/O and no async runtime; every other crate builds on this vocabulary.

pub mod codec;
pub mod error;
pub mod expiry;
pub mod keys;
pub mod models;
pub mod query;
