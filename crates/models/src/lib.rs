// Core modules
pub mod event;
pub mod login_attempt;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use event::{Event, EventRegistration, NewEventRegistration};
pub use login_attempt::{LoginAttempt, NewLoginAttempt};
pub use session::{NewSession, Session};
pub use user::{Identifier, NewUser, User, UserProfile};
