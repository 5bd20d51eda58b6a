// Storage layer for EventHub control-plane
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - repositories: PostgreSQL implementation (sqlx)
// - memory: in-memory implementation with the same API
// - backend: enum that dispatches to either

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::Database;
