use crate::middleware::auth::{clear_session_cookie, extract_session_token, session_cookie};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use festx_auth::{AuthError, IssuedSession, LoginRequest, RegisterRequest};
use festx_models::user::{Identifier, UserProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

/// Map a service error to its HTTP status and client-safe body. Database
/// and internal failures are logged and collapsed to a generic 500 —
/// driver details never reach the client.
pub fn auth_error_response(e: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match &e {
        AuthError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        AuthError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
        AuthError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        AuthError::UserInactive => (
            StatusCode::UNAUTHORIZED,
            "Account is inactive. Please contact support.".to_string(),
        ),
        AuthError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, e.to_string()),
        AuthError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        AuthError::DatabaseError(_) | AuthError::PasswordHashError(_) | AuthError::Internal(_) => {
            tracing::error!("Auth error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        }
    };

    (status, Json(ErrorResponse::new(&message)))
}

/// Client IP for the login-attempt log, taken from proxy headers when
/// present.
fn extract_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|h| h.to_str().ok()))
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

fn set_session_cookie(session: &IssuedSession, secure: bool) -> [(HeaderName, String); 1] {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    [(header::SET_COOKIE, session_cookie(&session.token, max_age, secure))]
}

// Wire-level register body. Required fields are Options here so a missing
// field becomes a 400 with a message instead of a deserialization reject.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(alias = "username")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: Option<String>,
}

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)>
{
    let (name, password) = match (body.name, body.password) {
        (Some(name), Some(password)) => (name, password),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Please provide all required fields")),
            ));
        }
    };

    let request = RegisterRequest {
        name,
        email: body.email,
        mobile: body.mobile,
        password,
        confirm_password: body.confirm_password,
    };

    let (user, session) = state
        .auth_service
        .register(request)
        .await
        .map_err(auth_error_response)?;

    tracing::info!("User registered: {}", user.id);

    Ok((
        StatusCode::CREATED,
        set_session_cookie(&session, state.cookie_secure),
        Json(AuthResponse {
            success: true,
            message: "Registration successful".to_string(),
            user,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub identifier: Option<String>,
    pub password: Option<String>,
}

/// Login with an email or mobile identifier
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<LoginBody>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<AuthResponse>), (StatusCode, Json<ErrorResponse>)>
{
    let (identifier, password) = match (body.identifier, body.password) {
        (Some(identifier), Some(password)) if !identifier.trim().is_empty() => {
            (identifier, password)
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Please provide login credentials")),
            ));
        }
    };

    // The identifier's shape is classified exactly once, here at the
    // boundary; everything below branches on the variant.
    let request = LoginRequest {
        identifier: Identifier::parse(&identifier),
        password,
        ip_address: extract_ip(&headers),
    };

    let (user, session) = state
        .auth_service
        .login(request)
        .await
        .map_err(auth_error_response)?;

    tracing::info!("User logged in: {}", user.id);

    Ok((
        StatusCode::OK,
        set_session_cookie(&session, state.cookie_secure),
        Json(AuthResponse {
            success: true,
            message: "Login successful".to_string(),
            user,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Logout. Idempotent: succeeds whether or not a live session was presented.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<LogoutResponse>), (StatusCode, Json<ErrorResponse>)>
{
    if let Some(token) = extract_session_token(&headers) {
        state
            .auth_service
            .logout(&token)
            .await
            .map_err(auth_error_response)?;
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(state.cookie_secure))],
        Json(LogoutResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// Get the current user from the session cookie
pub async fn me(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(token) = extract_session_token(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response();
    };

    match state.auth_service.current_user(&token).await {
        Ok(user) => (
            StatusCode::OK,
            Json(MeResponse {
                success: true,
                user: user.into(),
            }),
        )
            .into_response(),
        Err(e @ (AuthError::DatabaseError(_) | AuthError::Internal(_))) => {
            tracing::error!("Session lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error")),
            )
                .into_response()
        }
        // Unknown and expired tokens look the same; both clear the cookie
        // so the client stops retrying a dead token.
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            [(header::SET_COOKIE, clear_session_cookie(state.cookie_secure))],
            Json(ErrorResponse::new("Session expired")),
        )
            .into_response(),
    }
}
