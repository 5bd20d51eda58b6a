// Category domain type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Named grouping for events.
/// Categories are created once and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Category {
    /// Unique identifier for the category.
    pub id: Uuid,
    /// Display name of the category.
    pub name: String,
    /// What kind of events belong here.
    pub description: String,
    /// Timestamp when the category was created.
    pub created_at: DateTime<Utc>,
}
