// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides a PostgreSQL-compatible API backed by in-memory
// HashMaps, allowing the control-plane to run without a database for development.

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    categories: RwLock<HashMap<Uuid, CategoryRow>>,
    events: RwLock<HashMap<Uuid, EventRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn upsert_user(&self, input: UpsertUserRow) -> Result<UserRow> {
        Ok(self.put_user(input))
    }

    fn put_user(&self, input: UpsertUserRow) -> UserRow {
        let now = Self::now();
        let mut users = self.users.write();
        let row = users
            .entry(input.id)
            .and_modify(|user| {
                user.email = input.email.clone();
                user.name = input.name.clone();
                user.updated_at = now;
            })
            .or_insert_with(|| UserRow {
                id: input.id,
                email: input.email.clone(),
                name: input.name.clone(),
                created_at: now,
                updated_at: now,
            });
        row.clone()
    }

    pub async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<UserRow>> {
        let users = self.users.read();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn create_category(&self, input: CreateCategoryRow) -> Result<CategoryRow> {
        let id = Uuid::now_v7();
        let row = CategoryRow {
            id,
            name: input.name,
            description: input.description,
            created_at: Self::now(),
        };
        self.categories.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Option<CategoryRow>> {
        Ok(self.categories.read().get(&id).cloned())
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        let mut result: Vec<_> = self.categories.read().values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = EventRow {
            id,
            name: input.name,
            description: input.description,
            date: input.date,
            location: input.location,
            category_id: input.category_id,
            creator_id: input.creator_id,
            attendees: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.events.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn list_events(&self, filter: EventFilter) -> Result<Vec<EventRow>> {
        let mut result: Vec<_> = self
            .events
            .read()
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEventRow) -> Result<Option<EventRow>> {
        let mut events = self.events.write();
        if let Some(event) = events.get_mut(&id) {
            event.name = input.name;
            event.description = input.description;
            event.date = input.date;
            event.location = input.location;
            event.updated_at = Self::now();
            return Ok(Some(event.clone()));
        }
        Ok(None)
    }

    pub async fn delete_event(&self, id: Uuid) -> Result<bool> {
        Ok(self.events.write().remove(&id).is_some())
    }

    /// Membership check and append happen under one write lock.
    /// The user is mirrored only once the event is known to exist.
    pub async fn add_attendee(&self, event_id: Uuid, user: UpsertUserRow) -> Result<AttendOutcome> {
        let mut events = self.events.write();
        let Some(event) = events.get_mut(&event_id) else {
            return Ok(AttendOutcome::EventNotFound);
        };
        let user_id = self.put_user(user).id;
        if event.attendees.contains(&user_id) {
            return Ok(AttendOutcome::AlreadyAttending);
        }
        event.attendees.push(user_id);
        Ok(AttendOutcome::Added(event.clone()))
    }
}
