// HTTP-level tests for the EventHub API
// Runs the full router on the in-memory store in jwt mode; no server or database needed.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use eventhub_control_plane::app::build_app;
use eventhub_control_plane::auth::{AuthConfig, AuthMode, JwtConfig, JwtService};
use eventhub_control_plane::storage::StorageBackend;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "api-test-secret";

struct TestApp {
    router: Router,
    jwt: JwtService,
}

struct TestUser {
    id: Uuid,
    token: String,
}

impl TestApp {
    fn new() -> Self {
        let jwt = JwtConfig {
            secret: SECRET.to_string(),
            ..JwtConfig::default()
        };
        let config = AuthConfig {
            mode: AuthMode::Jwt,
            jwt: jwt.clone(),
        };

        Self {
            router: build_app(Arc::new(StorageBackend::in_memory()), config, ""),
            jwt: JwtService::new(jwt),
        }
    }

    fn user(&self, name: &str) -> TestUser {
        let id = Uuid::now_v7();
        let email = format!("{}@example.com", name.to_lowercase());
        let token = self
            .jwt
            .generate_access_token(id, &email, name, &[])
            .unwrap();
        TestUser { id, token }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&TestUser>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user.token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str, user: Option<&TestUser>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, user, None).await
    }

    async fn create_event(&self, user: &TestUser, body: Value) -> Value {
        let (status, event) = self.send(Method::POST, "/v1/events", Some(user), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{event}");
        event
    }
}

fn meetup() -> Value {
    json!({
        "name": "Meetup",
        "description": "Monthly meetup",
        "date": "2024-05-01",
        "location": "Hall A"
    })
}

#[tokio::test]
async fn test_category_create_and_list() {
    let app = TestApp::new();
    let alice = app.user("Alice");

    let (status, category) = app
        .send(
            Method::POST,
            "/v1/categories",
            Some(&alice),
            Some(json!({ "name": "Music", "description": "Live shows" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["name"], "Music");

    let (status, list) = app.get("/v1/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
    assert_eq!(list["data"][0]["id"], category["id"]);
}

#[tokio::test]
async fn test_category_requires_auth_and_valid_fields() {
    let app = TestApp::new();
    let alice = app.user("Alice");
    let body = json!({ "name": "Music", "description": "" });

    let (status, _) = app
        .send(Method::POST, "/v1/categories", None, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, error) = app
        .send(Method::POST, "/v1/categories", Some(&alice), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"][0]["field"], "description");
    assert_eq!(error["details"][0]["message"], "Description cannot be empty");

    let (_, list) = app.get("/v1/categories", None).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_forms_require_auth() {
    let app = TestApp::new();
    let alice = app.user("Alice");

    let (status, _) = app.get("/v1/categories/form", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, form) = app.get("/v1/events/form", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["fields"][0]["name"], "name");
    assert_eq!(form["fields"][0]["min_length"], 3);
    assert!(form["categories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_meetup_walkthrough() {
    let app = TestApp::new();
    let u = app.user("U");
    let u2 = app.user("U2");

    let event = app.create_event(&u, meetup()).await;
    let event_id = event["id"].as_str().unwrap().to_string();
    assert_eq!(event["creator_id"], u.id.to_string());
    assert_eq!(event["attendees"], json!([]));

    let (_, created) = app.get("/v1/me/events/created", Some(&u)).await;
    assert_eq!(created["data"][0]["event"]["id"], event_id);
    assert_eq!(created["data"][0]["is_creator"], true);

    let attend = format!("/v1/events/{event_id}/attend");
    let (status, view) = app.send(Method::POST, &attend, Some(&u2), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["is_attendee"], true);
    assert_eq!(view["event"]["attendees"], json!([u2.id.to_string()]));

    let (_, ongoing) = app.get("/v1/me/events/ongoing", Some(&u2)).await;
    assert_eq!(ongoing["data"].as_array().unwrap().len(), 1);
    assert_eq!(ongoing["data"][0]["event"]["id"], event_id);

    let (_, me) = app.get("/v1/me", Some(&u2)).await;
    assert_eq!(me["events"], json!([event_id]));

    let (status, error) = app.send(Method::POST, &attend, Some(&u2), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"], "You are already an attendee of this event");

    let (status, details) = app.get(&format!("/v1/events/{event_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["event"]["attendees"], json!([u2.id.to_string()]));
    assert_eq!(details["attendees"][0]["name"], "U2");
    assert_eq!(details["creator"]["name"], "U");
    assert_eq!(details["is_attendee"], false);
}

#[tokio::test]
async fn test_only_creator_may_edit_or_delete() {
    let app = TestApp::new();
    let owner = app.user("Owner");
    let other = app.user("Other");

    let event = app.create_event(&owner, meetup()).await;
    let uri = format!("/v1/events/{}", event["id"].as_str().unwrap());
    let edit = json!({
        "name": "Hijacked",
        "description": "Not yours",
        "date": "2030-01-01",
        "location": "Elsewhere"
    });

    let (status, error) = app
        .send(Method::PUT, &uri, Some(&other), Some(edit.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Only the creator may edit this event");

    let (status, _) = app.get(&format!("{uri}/edit"), Some(&other)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, details) = app.get(&uri, None).await;
    assert_eq!(details["event"]["name"], "Meetup");

    let (status, form) = app.get(&format!("{uri}/edit"), Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["event"]["name"], "Meetup");

    let (status, updated) = app.send(Method::PUT, &uri, Some(&owner), Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Hijacked");

    let (status, body) = app.send(Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, error) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Event not found");
}

#[tokio::test]
async fn test_event_validation_reports_all_fields() {
    let app = TestApp::new();
    let alice = app.user("Alice");

    let (status, error) = app
        .send(
            Method::POST,
            "/v1/events",
            Some(&alice),
            Some(json!({ "name": "Go", "location": "Hall" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = error["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "description", "date", "location"]);
    assert_eq!(error["details"][0]["message"], "Name must be at least 3 characters long");

    let (_, index) = app.get("/v1/events", None).await;
    assert!(index["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_events_by_category() {
    let app = TestApp::new();
    let alice = app.user("Alice");

    let (_, category) = app
        .send(
            Method::POST,
            "/v1/categories",
            Some(&alice),
            Some(json!({ "name": "Music", "description": "Live shows" })),
        )
        .await;
    let category_id = category["id"].as_str().unwrap();

    let mut body = meetup();
    body["category_id"] = json!(category_id);
    let filed = app.create_event(&alice, body).await;
    app.create_event(&alice, meetup()).await;

    let (status, listing) = app
        .get(&format!("/v1/categories/{category_id}/events"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["category"]["name"], "Music");
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);
    assert_eq!(listing["data"][0]["event"]["id"], filed["id"]);

    let (status, listing) = app
        .get(&format!("/v1/categories/{}/events", Uuid::now_v7()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(listing.get("category").is_none());
    assert!(listing["data"].as_array().unwrap().is_empty());

    let (_, index) = app.get("/v1/events", Some(&alice)).await;
    assert_eq!(index["data"].as_array().unwrap().len(), 2);
    assert_eq!(index["categories"][0]["id"], category_id);
    assert_eq!(index["data"][0]["is_creator"], true);
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let app = TestApp::new();
    let alice = app.user("Alice");
    let uri = format!("/v1/events/{}", Uuid::now_v7());

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::POST, &format!("{uri}/attend"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = TestApp::new();
    let alice = app.user("Alice");

    let (status, body) = app.get("/v1/events/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = app
        .send(Method::POST, "/v1/events/not-a-uuid/attend", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = app.send(Method::POST, "/v1/events", Some(&alice), None).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = app
        .send(Method::POST, "/v1/categories", Some(&alice), Some(json!("Meetups")))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new();
    let forged = TestUser {
        id: Uuid::now_v7(),
        token: "not-a-token".to_string(),
    };

    let (status, error) = app.get("/v1/me", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"], "Invalid or expired token");

    // Public reads treat a bad token as anonymous
    let (status, _) = app.get("/v1/events", Some(&forged)).await;
    assert_eq!(status, StatusCode::OK);
}
