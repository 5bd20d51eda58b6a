// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(std::sync::Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL and apply migrations
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(std::sync::Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Users
    // ============================================

    pub async fn upsert_user(&self, input: UpsertUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.upsert_user(input).await,
            Self::InMemory(db) => db.upsert_user(input).await,
        }
    }

    pub async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_users(ids).await,
            Self::InMemory(db) => db.get_users(ids).await,
        }
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn create_category(&self, input: CreateCategoryRow) -> Result<CategoryRow> {
        match self {
            Self::Postgres(db) => db.create_category(input).await,
            Self::InMemory(db) => db.create_category(input).await,
        }
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.get_category(id).await,
            Self::InMemory(db) => db.get_category(id).await,
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.list_categories().await,
            Self::InMemory(db) => db.list_categories().await,
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        match self {
            Self::Postgres(db) => db.create_event(input).await,
            Self::InMemory(db) => db.create_event(input).await,
        }
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_event(id).await,
            Self::InMemory(db) => db.get_event(id).await,
        }
    }

    pub async fn list_events(&self, filter: EventFilter) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.list_events(filter).await,
            Self::InMemory(db) => db.list_events(filter).await,
        }
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEventRow) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.update_event(id, input).await,
            Self::InMemory(db) => db.update_event(id, input).await,
        }
    }

    pub async fn delete_event(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_event(id).await,
            Self::InMemory(db) => db.delete_event(id).await,
        }
    }

    pub async fn add_attendee(&self, event_id: Uuid, user: UpsertUserRow) -> Result<AttendOutcome> {
        match self {
            Self::Postgres(db) => db.add_attendee(event_id, user).await,
            Self::InMemory(db) => db.add_attendee(event_id, user).await,
        }
    }
}
