pub mod error;
pub mod password;
pub mod service;
pub mod throttle;
pub mod token;

pub use error::{AuthError, Result};
pub use password::PasswordHasher;
pub use service::{AuthConfig, AuthService, IssuedSession, LoginRequest, RegisterRequest};
pub use throttle::LoginThrottle;
pub use token::{generate_session_token, hash_token};
