//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use repodo_config::Config;
use repodo_server::{AppState, router};
use repodo_store::Store;

fn app() -> Router {
    let mut config = Config::default();
    config.storage.database_path = Some(":memory:".to_string());
    let store = Store::open_in_memory().expect("in-memory store");
    router(AppState::new(store, &config))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn create_todo(app: &Router, user: &str, text: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/todos",
            json!({"userId": user, "text": text}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = app().oneshot(get("/healthz")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_todos_requires_user_id() {
    let response = app().oneshot(get("/api/todos")).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User id is required");
}

#[tokio::test]
async fn create_rejects_empty_fields_without_writing() {
    let app = app();

    for body in [
        json!({"userId": "", "text": "hello"}),
        json!({"userId": "u1", "text": ""}),
        json!({"userId": "u1"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/todos", body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app.oneshot(get("/api/todos?userId=u1")).await.expect("response");
    let todos = body_json(response).await;
    assert_eq!(todos, json!([]));
}

#[tokio::test]
async fn create_then_list_roundtrip() {
    let app = app();
    let created = create_todo(&app, "u1", "Write tests").await;
    assert_eq!(created["text"], "Write tests");
    assert_eq!(created["completed"], false);
    assert_ne!(created["id"], "");

    let response = app.oneshot(get("/api/todos?userId=u1")).await.expect("response");
    let todos = body_json(response).await;
    assert_eq!(todos.as_array().expect("array").len(), 1);
    assert_eq!(todos[0]["id"], created["id"]);
}

#[tokio::test]
async fn update_requires_at_least_one_field() {
    let app = app();
    let created = create_todo(&app, "u1", "Original").await;
    let uri = format!("/api/todos/{}", created["id"].as_str().expect("id"));

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "At least one field is required for update");
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/api/todos/00000000-0000-4000-8000-000000000000",
            json!({"completed": true}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Todo not found");
}

#[tokio::test]
async fn update_toggles_completed() {
    let app = app();
    let created = create_todo(&app, "u1", "Toggle me").await;
    let uri = format!("/api/todos/{}", created["id"].as_str().expect("id"));

    let response = app
        .oneshot(json_request("PUT", &uri, json!({"completed": true})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["text"], "Toggle me");
}

#[tokio::test]
async fn delete_returns_success_and_id() {
    let app = app();
    let created = create_todo(&app, "u1", "Delete me").await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/todos/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"success": true, "id": id}));

    // Deleting again finds nothing.
    let response = app
        .oneshot(delete(&format!("/api/todos/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clear_completed_counts_only_completed() {
    let app = app();
    let done = create_todo(&app, "u1", "Done").await;
    create_todo(&app, "u1", "Active").await;

    let uri = format!("/api/todos/{}", done["id"].as_str().expect("id"));
    app.clone()
        .oneshot(json_request("PUT", &uri, json!({"completed": true})))
        .await
        .expect("response");

    let response = app
        .clone()
        .oneshot(delete("/api/todos/completed?userId=u1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"success": true, "count": 1}));

    let response = app.oneshot(get("/api/todos?userId=u1")).await.expect("response");
    let remaining = body_json(response).await;
    assert_eq!(remaining.as_array().expect("array").len(), 1);
    assert_eq!(remaining[0]["text"], "Active");
}

fn snapshot(id: &str) -> Value {
    json!({
        "id": id,
        "name": "example",
        "description": "An example repository",
        "html_url": "https://github.com/u/example",
        "language": "Rust",
        "stargazers_count": 8,
        "forks_count": 2,
        "updated_at": "2024-05-01T00:00:00Z"
    })
}

#[tokio::test]
async fn favorites_add_list_remove_flow() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            json!({"userId": "u1", "repository": snapshot("R_1")}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let response = app
        .clone()
        .oneshot(get("/api/favorites?userId=u1"))
        .await
        .expect("response");
    let favorites = body_json(response).await;
    assert_eq!(favorites.as_array().expect("array").len(), 1);
    assert_eq!(favorites[0]["id"], "R_1");
    assert_eq!(favorites[0]["stargazers_count"], 8);

    let response = app
        .clone()
        .oneshot(delete("/api/favorites?userId=u1&repositoryId=R_1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/api/favorites?userId=u1"))
        .await
        .expect("response");
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn favorites_validation_and_unknown_remove() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/favorites", json!({"userId": "u1"})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(delete("/api/favorites?userId=u1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(delete("/api/favorites?userId=u1&repositoryId=R_missing"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn github_endpoints_require_a_token() {
    let app = app();

    for uri in ["/api/github/repositories", "/api/github/search?query=rust"] {
        let response = app.clone().oneshot(get(uri)).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Authentication token is required");
    }
}

#[tokio::test]
async fn github_search_requires_a_query() {
    let request = Request::builder()
        .uri("/api/github/search")
        .header(header::AUTHORIZATION, "Bearer gho_test")
        .body(Body::empty())
        .expect("request");

    let response = app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Search query is required");
}

async fn auth(app: &Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth", body))
        .await
        .expect("response");
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn signup_then_login() {
    let app = app();

    let (status, body) = auth(
        &app,
        json!({"email": "ada@example.com", "password": "hunter22", "action": "signup"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let uid = body["user"]["uid"].as_str().expect("uid").to_string();
    assert_eq!(body["user"]["email"], "ada@example.com");

    let (status, body) = auth(
        &app,
        json!({"email": "ada@example.com", "password": "hunter22", "action": "login"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["uid"], uid);
}

#[tokio::test]
async fn login_failures_do_not_distinguish_cause() {
    let app = app();
    auth(
        &app,
        json!({"email": "ada@example.com", "password": "hunter22", "action": "signup"}),
    )
    .await;

    let wrong_password = auth(
        &app,
        json!({"email": "ada@example.com", "password": "nope-nope", "action": "login"}),
    )
    .await;
    let unknown_email = auth(
        &app,
        json!({"email": "ghost@example.com", "password": "hunter22", "action": "login"}),
    )
    .await;

    for (status, body) in [wrong_password, unknown_email] {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn signup_rejections() {
    let app = app();

    let (status, body) = auth(
        &app,
        json!({"email": "ada@example.com", "password": "short", "action": "signup"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password is too weak");

    auth(
        &app,
        json!({"email": "ada@example.com", "password": "hunter22", "action": "signup"}),
    )
    .await;
    let (status, body) = auth(
        &app,
        json!({"email": "ada@example.com", "password": "hunter22", "action": "signup"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This email is already registered");
}

#[tokio::test]
async fn auth_validates_action_and_fields() {
    let app = app();

    let (status, body) = auth(&app, json!({"email": "a@b.com", "password": "hunter22"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid action");

    let (status, body) = auth(&app, json!({"email": "a@b.com", "action": "login"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn logout_acknowledges() {
    let response = app().oneshot(get("/api/auth")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));
}

#[tokio::test]
async fn unparseable_json_body_answers_with_error_field() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().expect("error field").contains("JSON"));
}

#[tokio::test]
async fn unparseable_query_string_answers_with_error_field() {
    let request = Request::builder()
        .uri("/api/github/repositories?limit=abc")
        .header(header::AUTHORIZATION, "Bearer gho_test")
        .body(Body::empty())
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn signup_rejects_malformed_email() {
    let app = app();

    for email in ["not-an-address", "@example.com", "ada@"] {
        let (status, body) = auth(
            &app,
            json!({"email": email, "password": "hunter22", "action": "signup"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "email {email:?}");
        assert_eq!(body["error"], "Invalid email address");
    }
}
