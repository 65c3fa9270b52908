//! snipbin-storage
//!
//! The snippet repository boundary: the [`SnippetRepository`] trait plus an
//! in-memory store and an S3 document store that both satisfy it.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod repository;
pub mod s3;

pub use memory::MemoryRepository;
pub use repository::{Clock, SnippetRepository, system_clock};
pub use s3::S3Repository;
