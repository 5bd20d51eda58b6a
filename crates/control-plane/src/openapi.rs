// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the EventHub API.
// It can be used by both the main API server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::api::{ErrorResponse, ListResponse};
use eventhub_core::{
    Category, Event, EventDetails, EventView, FieldError, FormField, UserProfile, UserSummary,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the EventHub API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::categories::list_categories,
        api::categories::category_form_fields,
        api::categories::create_category,
        api::categories::list_category_events,
        api::events::list_events,
        api::events::new_event_form,
        api::events::create_event,
        api::events::get_event,
        api::events::edit_event_form,
        api::events::update_event,
        api::events::delete_event,
        api::events::attend_event,
        api::users::get_profile,
        api::users::list_created_events,
        api::users::list_ongoing_events,
    ),
    components(
        schemas(
            Category, Event, EventView, EventDetails, UserSummary, UserProfile,
            FieldError, FormField, ErrorResponse,
            api::categories::CreateCategoryRequest,
            api::categories::CategoryFormResponse,
            api::categories::CategoryEventsResponse,
            api::events::CreateEventRequest,
            api::events::UpdateEventRequest,
            api::events::EventIndexResponse,
            api::events::EventFormResponse,
            ListResponse<Category>,
            ListResponse<EventView>,
        )
    ),
    tags(
        (name = "categories", description = "Category listing and submission"),
        (name = "events", description = "Event management and attendance"),
        (name = "users", description = "The signed-in user's profile and events")
    ),
    info(
        title = "EventHub API",
        version = "0.1.0",
        description = "API for publishing events, filing them under categories and signing up to attend",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> serde_json::Result<String> {
        Self::openapi().to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/v1/categories",
            "/v1/categories/form",
            "/v1/categories/{category_id}/events",
            "/v1/events",
            "/v1/events/form",
            "/v1/events/{event_id}",
            "/v1/events/{event_id}/edit",
            "/v1/events/{event_id}/attend",
            "/v1/me",
            "/v1/me/events/created",
            "/v1/me/events/ongoing",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_to_json() {
        let json = ApiDoc::to_json().unwrap();
        assert!(json.contains("EventHub API"));
    }
}
