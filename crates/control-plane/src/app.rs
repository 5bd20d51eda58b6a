// Router assembly
// Decision: Health and Swagger UI stay unprefixed; API_PREFIX applies to /v1 routes only

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::auth::{AuthConfig, AuthState};
use crate::openapi::ApiDoc;
use crate::services::{CategoryService, EventService};
use crate::storage::StorageBackend;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    auth_mode: String,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    auth_mode: String,
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        auth_mode: state.auth_mode,
        storage: state.storage,
    })
}

/// Build the complete application router (without CORS and tracing layers)
pub fn build_app(db: Arc<StorageBackend>, auth_config: AuthConfig, api_prefix: &str) -> Router {
    let health_state = HealthState {
        auth_mode: format!("{:?}", auth_config.mode),
        storage: if db.is_dev_mode() {
            "memory"
        } else {
            "postgres"
        },
    };

    let auth_state = AuthState::new(auth_config);
    let category_service = Arc::new(CategoryService::new(db.clone()));
    let event_service = Arc::new(EventService::new(db));

    let categories_state =
        api::categories::AppState::new(category_service, event_service.clone(), auth_state.clone());
    let events_state = api::events::AppState::new(event_service.clone(), auth_state.clone());
    let users_state = api::users::UsersState {
        events: event_service,
        auth: auth_state,
    };

    let api_routes = Router::new()
        .merge(api::categories::routes(categories_state))
        .merge(api::events::routes(events_state))
        .merge(api::users::routes(users_state));

    Router::new()
        .route("/health", get(health).with_state(health_state))
        .merge(build_router_with_prefix(api_routes, api_prefix))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
