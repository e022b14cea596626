//! HTTP-level tests for the auth and event-registration endpoints, driven
//! through the full router.
//!
//! These run against a real PostgreSQL database (DATABASE_URL) with the
//! migrations applied, so they are ignored by default:
//!
//!     cargo test -p festx-api -- --ignored

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use festx_api::{config::Config, routes, AppState};
use festx_auth::AuthService;
use festx_database::{Database, EventRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn build_test_app() -> (Router, PgPool) {
    let config = Config::from_env();
    let database = Database::new(config.database.clone())
        .await
        .expect("Failed to connect to database");
    let pool = database.pool().clone();

    let state = Arc::new(AppState {
        auth_service: AuthService::new(&database, config.auth()),
        events: EventRepository::new(pool.clone()),
        cookie_secure: false,
    });

    (routes::create_router(state), pool)
}

async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `session_token=...` cookie pair from a Set-Cookie header.
fn session_cookie_pair(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response must set a session cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

/// Register a user with a unique email; returns (email, password, cookie).
async fn register_user(app: Router, tag: &str) -> (String, String, String) {
    let email = format!("{}-{}@test.com", tag, Uuid::new_v4());
    let password = "secret123".to_string();
    let response = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({ "name": "Test User", "email": email, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie_pair(&response);
    (email, password, cookie)
}

// ---------------------------------------------------------------------------
// Auth flow
// ---------------------------------------------------------------------------

/// Register -> login -> me -> logout roundtrip, including double logout.
#[tokio::test]
#[ignore] // Only run with database available
async fn test_register_login_me_logout_roundtrip() {
    let (app, _pool) = build_test_app().await;

    let (email, password, register_cookie) = register_user(app.clone(), "roundtrip").await;

    // Registration leaves the client authenticated
    let response = get(app.clone(), "/api/auth/me", Some(&register_cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["user"]["email"], email);
    let user_id = me["user"]["id"].clone();

    // A fresh login issues a second, independent session
    let response = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "identifier": email, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let login_cookie = session_cookie_pair(&response);
    assert_ne!(login_cookie, register_cookie);

    // Both sessions verify to the same user
    let response = get(app.clone(), "/api/auth/me", Some(&login_cookie)).await;
    let me = body_json(response).await;
    assert_eq!(me["user"]["id"], user_id);

    // Logout kills the session...
    let response = post_json(
        app.clone(),
        "/api/auth/logout",
        serde_json::json!({}),
        Some(&login_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/api/auth/me", Some(&login_cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // ...and a second logout with the same dead cookie still succeeds
    let response = post_json(
        app,
        "/api/auth/logout",
        serde_json::json!({}),
        Some(&login_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Wrong password and unknown identifier are byte-identical to the caller.
#[tokio::test]
#[ignore] // Only run with database available
async fn test_failed_login_does_not_reveal_identifier_existence() {
    let (app, _pool) = build_test_app().await;

    let (email, _password, _cookie) = register_user(app.clone(), "enum").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "identifier": email, "password": "wrong-password" }),
        None,
    )
    .await;
    let unknown_identifier = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({
            "identifier": format!("nobody-{}@test.com", Uuid::new_v4()),
            "password": "wrong-password"
        }),
        None,
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_identifier.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_identifier).await;
    assert_eq!(a, b, "the two failure responses must be identical");
}

/// Neither email nor mobile -> 400; mobile-only registration succeeds and
/// logs in by mobile.
#[tokio::test]
#[ignore] // Only run with database available
async fn test_registration_identifier_requirements() {
    let (app, _pool) = build_test_app().await;

    let response = post_json(
        app.clone(),
        "/api/auth/register",
        serde_json::json!({ "name": "No Identifier", "password": "secret123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unique-ish 10-digit mobile
    let mobile: String = format!("9{:09}", rand_digits());
    let response = post_json(
        app.clone(),
        "/api/auth/register",
        serde_json::json!({ "name": "Mobile Only", "mobile": mobile, "password": "secret123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "identifier": mobile, "password": "secret123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

fn rand_digits() -> u32 {
    // Enough uniqueness for a test database
    Uuid::new_v4().as_u128() as u32 % 1_000_000_000
}

/// Registering the same email twice -> 409 with a domain message.
#[tokio::test]
#[ignore] // Only run with database available
async fn test_duplicate_email_conflict() {
    let (app, _pool) = build_test_app().await;

    let (email, _password, _cookie) = register_user(app.clone(), "dup").await;

    let response = post_json(
        app,
        "/api/auth/register",
        serde_json::json!({ "name": "Other User", "email": email, "password": "secret123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    // Domain message, not a raw constraint error
    assert!(body["message"].as_str().unwrap().contains("email"));
}

/// Five failed attempts inside the window -> the sixth is throttled with
/// 429 before the password is even checked.
#[tokio::test]
#[ignore] // Only run with database available
async fn test_login_throttle_trips_after_five_failures() {
    let (app, _pool) = build_test_app().await;

    let (email, _password, _cookie) = register_user(app.clone(), "throttle").await;

    for _ in 0..5 {
        let response = post_json(
            app.clone(),
            "/api/auth/login",
            serde_json::json!({ "identifier": email, "password": "wrong-password" }),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "identifier": email, "password": "wrong-password" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

// ---------------------------------------------------------------------------
// Event registration (collaborator contract)
// ---------------------------------------------------------------------------

async fn create_test_event(pool: &PgPool) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO events (name, description, venue, start_date)
        VALUES ($1, 'Test event', 'Main stage', NOW() + INTERVAL '7 days')
        RETURNING id
        "#,
    )
    .bind(format!("Event {}", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .expect("event insert should succeed")
}

/// Event registration requires a session, succeeds once, conflicts twice.
#[tokio::test]
#[ignore] // Only run with database available
async fn test_event_registration_flow() {
    let (app, pool) = build_test_app().await;

    let event_id = create_test_event(&pool).await;
    let (_email, _password, cookie) = register_user(app.clone(), "event").await;

    // No session -> 401
    let response = post_json(
        app.clone(),
        &format!("/api/events/{}/register", event_id),
        serde_json::json!({}),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // First registration succeeds
    let response = post_json(
        app.clone(),
        &format!("/api/events/{}/register", event_id),
        serde_json::json!({}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Second attempt is a conflict
    let response = post_json(
        app.clone(),
        &format!("/api/events/{}/register", event_id),
        serde_json::json!({}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The registration shows up under the user's registrations
    let response = get(app.clone(), "/api/registrations/mine", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["event_id"] == serde_json::json!(event_id)));

    // Unknown event -> 404
    let response = post_json(
        app,
        &format!("/api/events/{}/register", Uuid::new_v4()),
        serde_json::json!({}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
