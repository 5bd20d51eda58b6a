// Error types for EventHub operations

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, EventsError>;

/// Errors a category or event operation can end with.
/// Every variant is terminal for the request; none is retried.
#[derive(Debug, Error)]
pub enum EventsError {
    /// One or more submitted fields are missing or malformed
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The requester is authenticated but does not own the resource
    #[error("Only the creator may {action} this event")]
    Forbidden { action: &'static str },

    /// Event not found
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    /// The user already attends the event
    #[error("You are already an attendee of this event")]
    AlreadyAttending { event_id: Uuid, user_id: Uuid },

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl EventsError {
    pub fn forbidden(action: &'static str) -> Self {
        EventsError::Forbidden { action }
    }
}

impl From<ValidationErrors> for EventsError {
    fn from(errors: ValidationErrors) -> Self {
        EventsError::Validation(errors)
    }
}
