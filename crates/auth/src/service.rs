use crate::error::{AuthError, Result};
use crate::password::PasswordHasher;
use crate::throttle::LoginThrottle;
use crate::token::{generate_session_token, hash_token};
use chrono::{DateTime, Duration, Utc};
use festx_database::{Database, LoginAttemptRepository, SessionRepository, UserRepository};
use festx_models::user::{Identifier, NewUser, UserProfile, MOBILE_RE};
use festx_models::NewSession;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(alias = "username")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    pub mobile: Option<String>,

    #[validate(length(min = 8))]
    pub password: String,

    #[serde(alias = "confirmPassword")]
    pub confirm_password: Option<String>,
}

#[derive(Debug)]
pub struct LoginRequest {
    pub identifier: Identifier,
    pub password: String,
    pub ip_address: String,
}

/// A freshly issued session: the raw token (cookie value) plus its expiry.
/// The database only ever sees the token's digest.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl_hours: i64,
    pub throttle_window_minutes: i64,
    pub throttle_max_failures: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // 24h, the shorter of the two observed variants
            session_ttl_hours: 24,
            throttle_window_minutes: 30,
            throttle_max_failures: 5,
        }
    }
}

pub struct AuthService {
    session_ttl: Duration,
    user_repo: UserRepository,
    session_repo: SessionRepository,
    throttle: LoginThrottle,
}

impl AuthService {
    pub fn new(db: &Database, config: AuthConfig) -> Self {
        let pool = db.pool().clone();

        Self {
            session_ttl: Duration::hours(config.session_ttl_hours),
            user_repo: UserRepository::new(pool.clone()),
            session_repo: SessionRepository::new(pool.clone()),
            throttle: LoginThrottle::new(
                LoginAttemptRepository::new(pool),
                config.throttle_window_minutes,
                config.throttle_max_failures,
            ),
        }
    }

    /// Register a new user and issue a session — a successful registration
    /// lands the client directly in the authenticated state.
    pub async fn register(&self, request: RegisterRequest) -> Result<(UserProfile, IssuedSession)> {
        request.validate()?;

        if request.email.is_none() && request.mobile.is_none() {
            return Err(AuthError::ValidationError(
                "Either an email address or a mobile number is required".to_string(),
            ));
        }

        if let Some(ref mobile) = request.mobile {
            if !MOBILE_RE.is_match(mobile) {
                return Err(AuthError::ValidationError(
                    "Mobile number must be exactly 10 digits".to_string(),
                ));
            }
        }

        if let Some(ref confirm) = request.confirm_password {
            if confirm != &request.password {
                return Err(AuthError::ValidationError(
                    "Passwords do not match".to_string(),
                ));
            }
        }

        let password_hash = PasswordHasher::hash_blocking(request.password).await?;

        let new_user = NewUser {
            name: request.name,
            email: request.email,
            mobile: request.mobile,
        };

        let user = self.user_repo.create(&new_user, &password_hash).await?;

        let session = self.issue_session(user.id).await?;

        Ok((user.into(), session))
    }

    /// Login with an identifier and password.
    ///
    /// An unknown identifier and a wrong password take the same exit: a
    /// recorded failed attempt and `InvalidCredentials`. The throttle check
    /// runs first, before any lookup or bcrypt work.
    pub async fn login(&self, request: LoginRequest) -> Result<(UserProfile, IssuedSession)> {
        let identifier = request.identifier.as_str();

        if self.throttle.too_many_failed_attempts(identifier).await? {
            return Err(AuthError::RateLimited);
        }

        let user = match self.user_repo.find_by_identifier(&request.identifier).await? {
            Some(user) => user,
            None => {
                self.throttle
                    .record_attempt(identifier, &request.ip_address, false)
                    .await?;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        let is_valid =
            PasswordHasher::verify_blocking(request.password, user.password_hash.clone()).await?;

        if !is_valid {
            self.throttle
                .record_attempt(identifier, &request.ip_address, false)
                .await?;
            return Err(AuthError::InvalidCredentials);
        }

        self.throttle
            .record_attempt(identifier, &request.ip_address, true)
            .await?;

        self.user_repo.update_last_login(user.id).await?;

        let session = self.issue_session(user.id).await?;

        Ok((user.into(), session))
    }

    /// Logout (delete the session row). Deleting an already-dead token still
    /// succeeds, so a double logout is harmless.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.session_repo.delete_by_token(&hash_token(token)).await?;
        Ok(())
    }

    /// Resolve a presented token to its user. Missing and expired sessions
    /// are indistinguishable here — both are `NotAuthenticated`. Every
    /// protected request goes back to the store of record; nothing is
    /// cached between calls.
    pub async fn current_user(&self, token: &str) -> Result<festx_models::User> {
        let user = self
            .session_repo
            .find_user_by_token(&hash_token(token))
            .await?
            .ok_or(AuthError::NotAuthenticated)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        Ok(user)
    }

    async fn issue_session(&self, user_id: Uuid) -> Result<IssuedSession> {
        let token = generate_session_token();
        let expires_at = Utc::now() + self.session_ttl;

        let new_session = NewSession {
            user_id,
            token_hash: hash_token(&token),
            expires_at,
        };

        self.session_repo.create(&new_session).await?;

        Ok(IssuedSession { token, expires_at })
    }
}
