// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Users (mirrored from verified identities)
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UpsertUserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

// ============================================
// Categories
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateCategoryRow {
    pub name: String,
    pub description: String,
}

// ============================================
// Events
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub category_id: Option<Uuid>,
    pub creator_id: Uuid,
    /// Attendee user IDs in join order
    pub attendees: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub category_id: Option<Uuid>,
    pub creator_id: Uuid,
}

/// Full replacement of the editable fields
#[derive(Debug, Clone)]
pub struct UpdateEventRow {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

/// Filters for listing events. Unset filters match everything;
/// set filters are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category_id: Option<Uuid>,
    pub creator_id: Option<Uuid>,
    pub attendee_id: Option<Uuid>,
}

impl EventFilter {
    pub fn by_category(category_id: Uuid) -> Self {
        Self {
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    pub fn by_creator(creator_id: Uuid) -> Self {
        Self {
            creator_id: Some(creator_id),
            ..Default::default()
        }
    }

    pub fn by_attendee(attendee_id: Uuid) -> Self {
        Self {
            attendee_id: Some(attendee_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, row: &EventRow) -> bool {
        self.category_id.map_or(true, |id| row.category_id == Some(id))
            && self.creator_id.map_or(true, |id| row.creator_id == id)
            && self
                .attendee_id
                .map_or(true, |id| row.attendees.contains(&id))
    }
}

/// Outcome of adding an attendee in a single store operation
#[derive(Debug, Clone)]
pub enum AttendOutcome {
    /// The user was appended; carries the updated event
    Added(EventRow),
    /// The user was already in the attendee list; nothing changed
    AlreadyAttending,
    /// No event with that ID
    EventNotFound,
}
