//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains the database adapters for the posts collection and
//! the read-only blog directory.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL support via SeaORM

pub mod database;

// Re-exports - In-Memory
pub use database::DatabaseConnections;
pub use database::memory::{InMemoryBlogDirectory, InMemoryPostRepository};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{PostgresBlogDirectory, PostgresPostRepository};
