use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown identifier. One variant, one message, so
    /// the two cases cannot be told apart from outside.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Account is inactive")]
    UserInactive,

    #[error("Too many failed login attempts. Please try again later.")]
    RateLimited,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(festx_database::DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<festx_database::DatabaseError> for AuthError {
    fn from(err: festx_database::DatabaseError) -> Self {
        match err {
            festx_database::DatabaseError::DuplicateEntry(msg) => AuthError::AlreadyExists(msg),
            festx_database::DatabaseError::NotFound(msg) => AuthError::NotFound(msg),
            other => AuthError::DatabaseError(other),
        }
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::PasswordHashError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::ValidationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Hashing task failed: {}", err))
    }
}
