use crate::handlers::auth::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use festx_models::User;
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_token";

/// Authenticated user context, inserted into request extensions by
/// `require_auth`. Collaborator handlers only ever see this — the verified
/// `id` is their whole contract with the auth slice.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            mobile: user.mobile,
        }
    }
}

/// Pull the session token out of the Cookie header, if present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Build the session Set-Cookie value: HttpOnly, SameSite=Strict, expiry
/// matching the session row, Secure outside local development.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// A Set-Cookie value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Middleware to require an authenticated session.
///
/// Missing, unknown, and expired tokens all produce the same 401; dead
/// tokens additionally get their cookie cleared so the client stops
/// retrying them.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_session_token(&headers).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        )
            .into_response()
    })?;

    let user = state.auth_service.current_user(&token).await.map_err(|e| {
        tracing::debug!("Session verification failed: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            [(header::SET_COOKIE, clear_session_cookie(state.cookie_secure))],
            Json(ErrorResponse::new("Session expired")),
        )
            .into_response()
    })?;

    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}
