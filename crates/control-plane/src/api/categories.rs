// Category HTTP routes
// Decision: Listing is public; the form and submission require a signed-in user

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use eventhub_core::validation::category_form;
use eventhub_core::{Category, EventView, FormField};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiError, ErrorResponse, JsonBody, ListResponse, PathParam};
use crate::auth::middleware::{AuthState, AuthUser, FromRef, OptionalAuthUser};
use crate::services::{CategoryService, EventService};

/// Request to create a category
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Display name of the category.
    #[serde(default)]
    #[schema(example = "Music")]
    pub name: String,
    /// What kind of events belong here.
    #[serde(default)]
    #[schema(example = "Concerts, open mics and listening parties")]
    pub description: String,
}

/// Field rules for the category form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryFormResponse {
    pub fields: Vec<FormField>,
}

/// Events belonging to one category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryEventsResponse {
    /// The category, absent when the ID matches none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub data: Vec<EventView>,
}

/// App state for category routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CategoryService>,
    pub events: Arc<EventService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(service: Arc<CategoryService>, events: Arc<EventService>, auth: AuthState) -> Self {
        Self {
            service,
            events,
            auth,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(input: &AppState) -> Self {
        input.auth.clone()
    }
}

/// Create category routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/categories", get(list_categories).post(create_category))
        .route("/v1/categories/form", get(category_form_fields))
        .route("/v1/categories/:category_id/events", get(list_category_events))
        .with_state(state)
}

/// GET /v1/categories - List all categories
#[utoipa::path(
    get,
    path = "/v1/categories",
    responses(
        (status = 200, description = "List of categories", body = ListResponse<Category>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Category>>, ApiError> {
    let categories = state.service.list().await?;
    Ok(Json(ListResponse::new(categories)))
}

/// GET /v1/categories/form - Fields of the category submission form
#[utoipa::path(
    get,
    path = "/v1/categories/form",
    responses(
        (status = 200, description = "Form field rules", body = CategoryFormResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories"
)]
pub async fn category_form_fields(_auth: AuthUser) -> Json<CategoryFormResponse> {
    Json(CategoryFormResponse {
        fields: category_form(),
    })
}

/// POST /v1/categories - Create a category
#[utoipa::path(
    post,
    path = "/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.service.create(req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /v1/categories/{category_id}/events - Events in a category
///
/// An unknown category yields an empty list rather than 404.
#[utoipa::path(
    get,
    path = "/v1/categories/{category_id}/events",
    params(
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Events in the category", body = CategoryEventsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_category_events(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    PathParam(category_id): PathParam<Uuid>,
) -> Result<Json<CategoryEventsResponse>, ApiError> {
    let (category, data) = state
        .events
        .list_by_category(category_id, viewer.id())
        .await?;

    Ok(Json(CategoryEventsResponse { category, data }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_missing_fields_default_to_empty() {
        let req: CreateCategoryRequest = serde_json::from_str(r#"{"name": "Music"}"#).unwrap();
        assert_eq!(req.name, "Music");
        assert_eq!(req.description, "");
    }

    #[test]
    fn test_category_events_response_without_category() {
        let json = serde_json::to_value(CategoryEventsResponse {
            category: None,
            data: vec![],
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "data": [] }));
    }
}
