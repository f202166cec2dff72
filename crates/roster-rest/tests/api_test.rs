//! End-to-end tests driving the full router over in-memory doubles.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use roster_config::ServerConfig;
use roster_core::NewUser;
use roster_repository::InMemoryUserRepository;
use roster_rest::{create_router, AppState};
use roster_service::{InMemoryCache, UserServiceImpl};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    repository: Arc<InMemoryUserRepository>,
    cache: Arc<InMemoryCache>,
}

impl TestApp {
    fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let service = Arc::new(UserServiceImpl::new(repository.clone(), cache.clone()));
        let state = AppState::new(service).with_health_check(cache.clone());
        let router = create_router(state, &ServerConfig::default());
        Self {
            router,
            repository,
            cache,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn send_json(&self, method: Method, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json(Method::POST, uri, body.to_string()).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send_json(Method::PUT, uri, body.to_string()).await
    }
}

fn john() -> Value {
    json!({"name": "John Doe", "email": "john@example.com", "age": 30})
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/v1/users", john()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["is_active"], true);
    assert!(body["data"]["phone"].is_null());

    let (status, body) = app.get("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "John Doe");
    assert_eq!(body["data"]["email"], "john@example.com");
    assert_eq!(body["data"]["age"], 30);

    let (status, body) = app
        .put(
            "/api/v1/users/1",
            json!({"name": "John Updated", "email": "john@example.com", "age": 31}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["age"], 31);
    assert_eq!(body["data"]["is_active"], true);

    let (status, body) = app.delete("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (status, body) = app.get("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let record = app.repository.record(roster_core::UserId::new(1)).unwrap();
    assert!(!record.is_live());
}

#[tokio::test]
async fn test_second_read_is_served_from_cache() {
    let app = TestApp::new();
    app.post("/api/v1/users", john()).await;
    let before = app.repository.calls().find_by_id;

    app.get("/api/v1/users/1").await;
    let (status, _) = app.get("/api/v1/users/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.repository.calls().find_by_id, before);
    assert!(app.cache.peek("user:1").is_some());
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let app = TestApp::new();
    for uri in ["/api/v1/users/abc", "/api/v1/users/-1", "/api/v1/users/1.5"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Invalid user ID");
    }

    let (status, _) = app.delete("/api/v1/users/xyz").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.repository.calls().total(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(Method::POST, "/api/v1/users", "{\"name\": ")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].is_string());

    let (status, body) = app
        .put("/api/v1/users/1", json!({"name": "John", "age": "thirty"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_validation_failure_lists_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/v1/users",
            json!({"name": "J", "email": "not-an-email", "age": 200}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"age"));
    assert_eq!(app.repository.calls().create, 0);
}

#[tokio::test]
async fn test_duplicate_email_is_bad_request() {
    let app = TestApp::new();
    app.post("/api/v1/users", john()).await;

    let (status, body) = app.post("/api/v1/users", john()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_EXISTS");
    assert_eq!(body["error"], "user with email john@example.com already exists");
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/v1/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.put("/api/v1/users/42", john()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/v1/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let app = TestApp::new();
    app.repository.set_unavailable(true);

    let (status, body) = app.get("/api/v1/users?page=1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORAGE_ERROR");
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::new();
    for i in 0..25 {
        app.repository.seed(NewUser::new(
            format!("User {i:02}"),
            format!("user{i}@example.com"),
            20 + i,
        ));
    }

    let (status, body) = app.get("/api/v1/users?page=3&page_size=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(
        body["pagination"],
        json!({"current_page": 3, "page_size": 10, "total_items": 25, "total_pages": 3})
    );

    let (_, body) = app.get("/api/v1/users?page=0&page_size=1000").await;
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["page_size"], 10);
    assert_eq!(body["data"][0]["id"], 1);

    let (status, body) = app.get("/api/v1/users?page=abc&page_size=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["page_size"], 10);

    let (_, body) = app.get("/api/v1/users?page=9").await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total_items"], 25);
}

#[tokio::test]
async fn test_deleted_users_are_not_listed() {
    let app = TestApp::new();
    app.post("/api/v1/users", john()).await;
    app.post(
        "/api/v1/users",
        json!({"name": "Jane Doe", "email": "jane@example.com", "age": 28}),
    )
    .await;
    app.delete("/api/v1/users/1").await;

    let (_, body) = app.get("/api/v1/users").await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "jane@example.com");
    assert_eq!(body["pagination"]["total_items"], 1);
}

#[tokio::test]
async fn test_update_without_active_flag_keeps_it() {
    let app = TestApp::new();
    let mut body = john();
    body["is_active"] = json!(false);
    app.post("/api/v1/users", body).await;

    let (_, body) = app
        .put(
            "/api/v1/users/1",
            json!({"name": "John Doe", "email": "john@example.com", "age": 31}),
        )
        .await;
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = app.get("/api/v1/users/1").await;
    assert_eq!(body["data"]["age"], 31);
    assert_eq!(body["data"]["is_active"], false);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_i64().unwrap() > 0);

    let (status, _) = app.get("/live").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["components"][0]["name"], "cache");
}

#[tokio::test]
async fn test_degraded_cache_keeps_service_ready() {
    let app = TestApp::new();
    app.cache.set_unavailable(true);

    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"][0]["status"], "degraded");

    let (status, _) = app.post("/api/v1/users", john()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.get("/api/v1/users/1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::new();
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
