//! Storage module for the API.
//!
//! Provides an in-memory backend (default) and a PostgreSQL backend
//! selected when DATABASE_URL is configured.

pub mod error;
pub mod traits;

// Storage backend implementations
pub mod memory;
pub mod postgres;

pub use error::StorageError;
pub use memory::MemoryStorageBackend;
pub use postgres::PostgresStorageBackend;
pub use traits::{AutomationPage, StorageBackend};
