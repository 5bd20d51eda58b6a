// Event domain types
//
// An Event has no status field. Its state is the attendee list plus the
// ownership check performed on each request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::category::Category;
use crate::user::UserSummary;

/// A scheduled activity with a creator and a set of attendees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// Display name of the event.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When the event happens. Stored as entered, never parsed.
    #[cfg_attr(feature = "openapi", schema(example = "2024-05-01"))]
    pub date: String,
    /// Where the event happens.
    pub location: String,
    /// Category the event belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// User who created the event. Only this user may edit or delete it.
    pub creator_id: Uuid,
    /// Users attending the event, in the order they joined.
    #[serde(default)]
    pub attendees: Vec<Uuid>,
    /// Timestamp when the event was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last edit.
    pub updated_at: DateTime<Utc>,
}

/// User-editable event fields, validated on create and on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl EventFields {
    /// Strip surrounding whitespace from every field before it is stored.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }
}

/// Event as returned by list endpoints: category resolved and flags computed
/// for the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventView {
    pub event: Event,
    /// The resolved category, absent when the event has none or it no longer exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Whether the requesting user attends this event. False for anonymous requests.
    pub is_attendee: bool,
    /// Whether the requesting user created this event. False for anonymous requests.
    pub is_creator: bool,
}

/// Event with every reference resolved, returned by the details endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventDetails {
    pub event: Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Absent only if the creator's profile was never mirrored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserSummary>,
    /// Attendee profiles in join order. Attendees without a mirrored profile are skipped.
    pub attendees: Vec<UserSummary>,
    pub is_attendee: bool,
    pub is_creator: bool,
}
