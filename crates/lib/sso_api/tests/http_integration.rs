//! Integration test: build the router over an in-memory store and drive it
//! with `oneshot` requests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Value, json};
use sso_api::{AppState, config::ApiConfig};
use sso_core::models::TokenClaims;
use sso_core::store::MemoryStore;
use sso_core::{AuthConfig, AuthService};
use tower::ServiceExt;
use tracing::Span;

struct Harness {
    app: Router,
    store: Arc<MemoryStore>,
    app_id: i32,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let app_id = store.insert_app("web", "web-secret");
    let auth = AuthService::with_store(
        Span::none(),
        store.clone(),
        AuthConfig::new(Duration::from_secs(3600)).with_bcrypt_cost(4),
    );
    let state = AppState {
        auth: Arc::new(auth),
        config: ApiConfig::new(0, Duration::from_secs(5)),
    };
    Harness {
        app: sso_api::router(state),
        store,
        app_id,
    }
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_returns_plain_ok() {
    let h = harness();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn register_then_login_issues_scoped_token() {
    let h = harness();

    let (status, body) = post(
        &h.app,
        "/register",
        json!({"name": "A", "email": "a@x.com", "password": "p1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["user_id"].as_i64().expect("user_id");

    let (status, body) = post(
        &h.app,
        "/login",
        json!({"email": "a@x.com", "password": "p1", "app_id": h.app_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().expect("token");
    let claims = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(b"web-secret"),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap()
    .claims;
    assert_eq!(claims.uid, user_id);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.app_id, h.app_id);
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let h = harness();
    let body = json!({"name": "A", "email": "a@x.com", "password": "p1"});

    assert_eq!(post(&h.app, "/register", body.clone()).await.0, StatusCode::OK);
    let (status, err) = post(&h.app, "/register", body).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "conflict");
    assert_eq!(h.store.count_email("a@x.com"), 1);
}

#[tokio::test]
async fn bad_credentials_look_the_same() {
    let h = harness();
    post(
        &h.app,
        "/register",
        json!({"name": "A", "email": "a@x.com", "password": "p1"}),
    )
    .await;

    let (wrong_pw, wrong_pw_body) = post(
        &h.app,
        "/login",
        json!({"email": "a@x.com", "password": "nope", "app_id": h.app_id}),
    )
    .await;
    let (unknown, unknown_body) = post(
        &h.app,
        "/login",
        json!({"email": "ghost@x.com", "password": "nope", "app_id": h.app_id}),
    )
    .await;

    assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, unknown_body);
}

#[tokio::test]
async fn malformed_input_is_rejected_before_the_service() {
    let h = harness();

    let cases = [
        ("/login", json!({"email": "not-an-email", "password": "p", "app_id": 1})),
        ("/login", json!({"email": "a@x.com", "password": "", "app_id": 1})),
        ("/login", json!({"email": "a@x.com", "password": "p"})),
        ("/register", json!({"email": "a@x.com", "password": "p"})),
        ("/register", json!({"name": "A", "email": "a@x.com"})),
        ("/isadmin", json!({})),
    ];
    for (uri, body) in cases {
        let (status, err) = post(&h.app, uri, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(err["error"], "validation_error");
    }
    assert_eq!(h.store.user_count(), 0);
}

#[tokio::test]
async fn is_admin_reports_flag_and_not_found() {
    let h = harness();
    let (_, body) = post(
        &h.app,
        "/register",
        json!({"name": "Root", "email": "root@x.com", "password": "p1"}),
    )
    .await;
    let user_id = body["user_id"].as_i64().unwrap();

    let (status, body) = post(&h.app, "/isadmin", json!({"user_id": user_id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);

    h.store.set_admin(user_id, true).unwrap();
    let (_, body) = post(&h.app, "/isadmin", json!({"user_id": user_id})).await;
    assert_eq!(body["is_admin"], true);

    let (status, _) = post(&h.app, "/isadmin", json!({"user_id": 999_999})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_app_is_bad_request() {
    let h = harness();
    post(
        &h.app,
        "/register",
        json!({"name": "A", "email": "a@x.com", "password": "p1"}),
    )
    .await;

    let (status, _) = post(
        &h.app,
        "/login",
        json!({"email": "a@x.com", "password": "p1", "app_id": 4242}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn post_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut req = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        req = req.header(header::CONTENT_TYPE, content_type);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json error body"))
}

#[tokio::test]
async fn undecodable_bodies_are_json_bad_requests() {
    let h = harness();
    let json = Some("application/json");

    let cases = [
        (json, r#"{"email":"a@x.com","password":"p","app_id":"abc"}"#),
        (json, r#"{"email":"a@x.com","password":"#),
        (None, r#"{"email":"a@x.com","password":"p","app_id":1}"#),
        (Some("text/plain"), r#"{"email":"a@x.com","password":"p","app_id":1}"#),
    ];
    for (content_type, body) in cases {
        let (status, err) = post_raw(&h.app, "/login", content_type, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{content_type:?} {body}");
        assert_eq!(err["error"], "validation_error");
        assert!(err["message"].is_string());
    }
}
