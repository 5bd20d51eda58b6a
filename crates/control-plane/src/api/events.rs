// Event HTTP routes
// Decision: Reads are public, flags are computed when a viewer is signed in
// Decision: Edit, update and delete are creator-only and answer 403 otherwise

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use eventhub_core::validation::event_form;
use eventhub_core::{Category, Event, EventDetails, EventView, FormField};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ErrorResponse, JsonBody, PathParam};
use crate::auth::middleware::{AuthState, AuthUser, FromRef, OptionalAuthUser};
use crate::services::EventService;

/// Request to create an event
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Display name, at least 3 characters.
    #[serde(default)]
    #[schema(example = "Meetup")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Monthly community meetup")]
    pub description: String,
    /// Free-form date, stored as entered.
    #[serde(default)]
    #[schema(example = "2024-05-01")]
    pub date: String,
    /// Where the event happens, at least 5 characters.
    #[serde(default)]
    #[schema(example = "Hall A")]
    pub location: String,
    /// Category to file the event under. Must exist when given.
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

/// Request to edit an event. All four fields are replaced.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    #[serde(default)]
    #[schema(example = "Quarterly meetup")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = "2024-07-01")]
    pub date: String,
    #[serde(default)]
    #[schema(example = "Hall B")]
    pub location: String,
}

/// Events index: all events plus every category for filtering
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventIndexResponse {
    pub data: Vec<EventView>,
    pub categories: Vec<Category>,
}

/// Field rules and choices for the event forms
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventFormResponse {
    pub fields: Vec<FormField>,
    pub categories: Vec<Category>,
    /// Current values, present on the edit form only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
}

// ============================================
// App State and Routes
// ============================================

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(service: Arc<EventService>, auth: AuthState) -> Self {
        Self { service, auth }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", get(list_events).post(create_event))
        .route("/v1/events/form", get(new_event_form))
        .route(
            "/v1/events/:event_id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/v1/events/:event_id/edit", get(edit_event_form))
        .route("/v1/events/:event_id/attend", post(attend_event))
        .with_state(state)
}

// ============================================
// HTTP Handlers
// ============================================

/// GET /v1/events - List all events
#[utoipa::path(
    get,
    path = "/v1/events",
    responses(
        (status = 200, description = "All events with categories", body = EventIndexResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
) -> Result<Json<EventIndexResponse>, ApiError> {
    let data = state.service.list(viewer.id()).await?;
    let categories = state.service.categories().await?;

    Ok(Json(EventIndexResponse { data, categories }))
}

/// GET /v1/events/form - Fields and categories for the new event form
#[utoipa::path(
    get,
    path = "/v1/events/form",
    responses(
        (status = 200, description = "Form field rules", body = EventFormResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn new_event_form(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<EventFormResponse>, ApiError> {
    let categories = state.service.categories().await?;

    Ok(Json(EventFormResponse {
        fields: event_form(),
        categories,
        event: None,
    }))
}

/// POST /v1/events - Create an event owned by the caller
#[utoipa::path(
    post,
    path = "/v1/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = state.service.create(req, &auth).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /v1/events/{event_id} - Event with creator, category and attendees
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventDetails),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    PathParam(event_id): PathParam<Uuid>,
) -> Result<Json<EventDetails>, ApiError> {
    let details = state.service.details(event_id, viewer.id()).await?;
    Ok(Json(details))
}

/// GET /v1/events/{event_id}/edit - Edit form prefilled with the event
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}/edit",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Edit form", body = EventFormResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn edit_event_form(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(event_id): PathParam<Uuid>,
) -> Result<Json<EventFormResponse>, ApiError> {
    let event = state.service.edit_form(event_id, auth.id).await?;
    let categories = state.service.categories().await?;

    Ok(Json(EventFormResponse {
        fields: event_form(),
        categories,
        event: Some(event),
    }))
}

/// PUT /v1/events/{event_id} - Replace the editable fields of an event
#[utoipa::path(
    put,
    path = "/v1/events/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(event_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    let event = state.service.update(event_id, req, auth.id).await?;
    Ok(Json(event))
}

/// DELETE /v1/events/{event_id} - Delete an event
#[utoipa::path(
    delete,
    path = "/v1/events/{event_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(event_id): PathParam<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(event_id, auth.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/events/{event_id}/attend - Join an event
#[utoipa::path(
    post,
    path = "/v1/events/{event_id}/attend",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Caller now attends the event", body = EventView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Caller already attends the event", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn attend_event(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParam(event_id): PathParam<Uuid>,
) -> Result<Json<EventView>, ApiError> {
    let view = state.service.attend(event_id, &auth).await?;
    Ok(Json(view))
}
