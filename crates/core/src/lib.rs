// EventHub core domain
//
// DB-agnostic entity types shared by the API and storage layers.
//
// Key design decisions:
// - Reference resolution (category, creator, attendees) is an explicit lookup
//   done by the read path; resolved views are plain structs defined here
// - Ownership and attendance are pure predicates over an Event
// - Field validation reports every violated field at once

pub mod access;
pub mod category;
pub mod error;
pub mod event;
pub mod user;
pub mod validation;

pub use access::{can_modify, is_attendee};
pub use category::Category;
pub use error::{EventsError, Result};
pub use event::{Event, EventDetails, EventFields, EventView};
pub use user::{UserProfile, UserSummary};
pub use validation::{FieldError, FormField, ValidationErrors};
