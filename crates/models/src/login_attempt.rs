use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only login attempt record. The identifier is stored by value, not
/// by foreign key, so attempts survive user deletion and failed attempts
/// against unknown identifiers still count toward throttling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoginAttempt {
    pub id: i64,
    pub identifier: String,
    pub ip_address: String,
    pub success: bool,
    pub attempted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLoginAttempt<'a> {
    pub identifier: &'a str,
    pub ip_address: &'a str,
    pub success: bool,
}
