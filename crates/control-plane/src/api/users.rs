// Users API routes
// Decision: Only the caller's own profile and event lists are exposed
// Decision: Accounts live in the identity provider, not here

use axum::{extract::State, routing::get, Json, Router};
use eventhub_core::{EventView, UserProfile};
use std::sync::Arc;

use super::common::{ApiError, ErrorResponse, ListResponse};
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::EventService;

/// App state for users routes
#[derive(Clone)]
pub struct UsersState {
    pub events: Arc<EventService>,
    pub auth: AuthState,
}

impl FromRef<UsersState> for AuthState {
    fn from_ref(input: &UsersState) -> Self {
        input.auth.clone()
    }
}

/// Create users routes
pub fn routes(state: UsersState) -> Router {
    Router::new()
        .route("/v1/me", get(get_profile))
        .route("/v1/me/events/created", get(list_created_events))
        .route("/v1/me/events/ongoing", get(list_ongoing_events))
        .with_state(state)
}

/// GET /v1/me - The caller's profile and attended event IDs
#[utoipa::path(
    get,
    path = "/v1/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_profile(
    State(state): State<UsersState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.events.profile(&auth).await?;
    Ok(Json(profile))
}

/// GET /v1/me/events/created - Events the caller created
#[utoipa::path(
    get,
    path = "/v1/me/events/created",
    responses(
        (status = 200, description = "Created events", body = ListResponse<EventView>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_created_events(
    State(state): State<UsersState>,
    auth: AuthUser,
) -> Result<Json<ListResponse<EventView>>, ApiError> {
    let events = state.events.list_by_creator(auth.id).await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /v1/me/events/ongoing - Events the caller attends
#[utoipa::path(
    get,
    path = "/v1/me/events/ongoing",
    responses(
        (status = 200, description = "Attended events", body = ListResponse<EventView>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_ongoing_events(
    State(state): State<UsersState>,
    auth: AuthUser,
) -> Result<Json<ListResponse<EventView>>, ApiError> {
    let events = state.events.list_by_attendee(auth.id).await?;
    Ok(Json(ListResponse::new(events)))
}
