//! Storage layer for coach-os
//!
//! PostgreSQL storage via sqlx, plus an in-process backend used for tests
//! and local demo runs. Both sit behind the same async domain traits and
//! are selected at runtime through [`StorageBackend`].

#![allow(clippy::missing_errors_doc, reason = "every store method returns StorageError")]

mod backend;
pub mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
pub use types::{EntryQuery, SortOrder};
