//! Shared harness for HTTP-level integration tests.
//!
//! Builds the application router with the same middleware stack
//! production uses and drives it through `tower::ServiceExt::oneshot`,
//! no TCP listener involved.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use taskboard_api::auth::jwt::{self, JwtConfig};
use taskboard_api::auth::password;
use taskboard_api::config::ServerConfig;
use taskboard_api::routes;
use taskboard_api::state::AppState;
use taskboard_api::storage::ImageStore;
use taskboard_core::types::Role;
use taskboard_db::models::user::{CreateUser, User};
use taskboard_db::repositories::UserRepo;

/// Signing secret every test token uses.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Small ceiling so oversized-upload tests stay cheap.
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiry_days: 7,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    let upload_dir = std::env::temp_dir()
        .join("taskboard-test-uploads")
        .to_string_lossy()
        .into_owned();
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        database_url: "sqlite::memory:".to_string(),
        public_base_url: "http://localhost:4000".to_string(),
        upload_dir,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same stack (static uploads, panic recovery, timeout,
/// request id, tracing, CORS, body limit) that production uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    std::fs::create_dir_all(&config.upload_dir).expect("upload dir");
    let images = ImageStore::new(&config.upload_dir, &config.public_base_url);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images: Arc::new(images),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse::<HeaderValue>().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .nest_service(
            "/uploads",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ))
                .service(ServeDir::new(&config.upload_dir)),
        )
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .layer(axum::extract::DefaultBodyLimit::max(
            TEST_MAX_UPLOAD_BYTES + 64 * 1024,
        ))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, token, None).await
}

/// Send a `PUT` with a hand-rolled multipart body: text fields plus an
/// optional `(field, filename, bytes)` file part.
pub async fn put_multipart(
    app: Router,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Response {
    let boundary = "taskboard-test-boundary";
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly through the repository.
pub async fn seed_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    role: Role,
    plaintext: &str,
) -> User {
    let input = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password::hash_password(plaintext).expect("hash"),
        role,
    };
    UserRepo::create(pool, &input).await.expect("seed user")
}

pub async fn seed_admin(pool: &SqlitePool) -> (User, String) {
    let user = seed_user(pool, "Ada Admin", "ada@example.com", Role::Admin, "admin123").await;
    let token = user_token(&user);
    (user, token)
}

pub async fn seed_employee(pool: &SqlitePool) -> (User, String) {
    let user = seed_user(
        pool,
        "Eli Employee",
        "eli@example.com",
        Role::Employee,
        "employee123",
    )
    .await;
    let token = user_token(&user);
    (user, token)
}

pub fn user_token(user: &User) -> String {
    jwt::issue_user_token(user.user_id, &user.name, user.role, &test_jwt_config())
        .expect("sign user token")
}

pub fn viewer_token(fkboardid: &str) -> String {
    jwt::issue_viewer_token(fkboardid, &test_jwt_config()).expect("sign viewer token")
}

/// Create a board over HTTP and return its response body.
pub async fn create_board(
    pool: &SqlitePool,
    token: &str,
    fkpoid: i64,
    project_name: &str,
    member_ids: &[i64],
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/boards",
        Some(token),
        serde_json::json!({
            "projectName": project_name,
            "fkpoid": fkpoid,
            "memberIds": member_ids,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Fetch the kanban tree for a board's external id.
pub async fn kanban(pool: &SqlitePool, token: Option<&str>, fkboardid: &str) -> serde_json::Value {
    let response = get(
        build_test_app(pool.clone()),
        &format!("/boards/{fkboardid}/kanban"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Create a card over HTTP and return its id.
pub async fn create_card(pool: &SqlitePool, token: &str, listid: i64, title: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/lists/{listid}/cards"),
        Some(token),
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["cardid"].as_i64().unwrap()
}

/// The `(listid, name)` pairs of a kanban tree in display order.
pub fn list_ids(tree: &serde_json::Value) -> Vec<(i64, String)> {
    tree["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| {
            (
                l["listid"].as_i64().unwrap(),
                l["name"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

/// Positions of every list in the tree, in display order.
pub fn list_positions(tree: &serde_json::Value) -> Vec<i64> {
    tree["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["position"].as_i64().unwrap())
        .collect()
}

/// `(cardid, position)` pairs of one list in the tree.
pub fn card_positions(tree: &serde_json::Value, listid: i64) -> Vec<(i64, i64)> {
    tree["lists"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["listid"].as_i64() == Some(listid))
        .expect("list in tree")["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["cardid"].as_i64().unwrap(), c["position"].as_i64().unwrap()))
        .collect()
}
