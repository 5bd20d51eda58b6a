// User types
//
// Users are owned by the external identity provider. EventHub mirrors the
// profile carried by the verified token so creators and attendees can be
// resolved for display.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Public view of a user, used when resolving creators and attendees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// The authenticated user's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// IDs of the events this user attends, in the order the events were created.
    pub events: Vec<Uuid>,
}
