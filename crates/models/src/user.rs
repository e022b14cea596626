use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    /// Bare 10-digit mobile number, no country code.
    pub static ref MOBILE_RE: Regex = Regex::new(r"^\d{10}$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,

    // Never serialized out to clients; handlers return UserProfile instead.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    pub mobile: Option<String>,
}

/// Public projection of a user: everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            mobile: user.mobile,
            created_at: user.created_at,
        }
    }
}

/// A login identifier, classified once at the input boundary.
///
/// Anything containing `@` is treated as an email address, everything else
/// as a mobile number. Lower layers branch on the variant and never re-sniff
/// the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Mobile(String),
}

impl Identifier {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.contains('@') {
            Identifier::Email(raw.to_string())
        } else {
            Identifier::Mobile(raw.to_string())
        }
    }

    /// The raw string as submitted (throttle key, attempt log).
    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Email(s) | Identifier::Mobile(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classification() {
        assert_eq!(
            Identifier::parse("alice@example.com"),
            Identifier::Email("alice@example.com".to_string())
        );
        assert_eq!(
            Identifier::parse("9876543210"),
            Identifier::Mobile("9876543210".to_string())
        );
        // Whitespace is trimmed before classification
        assert_eq!(
            Identifier::parse("  bob@x.com "),
            Identifier::Email("bob@x.com".to_string())
        );
    }

    #[test]
    fn test_identifier_as_str_returns_raw_value() {
        assert_eq!(Identifier::parse("alice@example.com").as_str(), "alice@example.com");
        assert_eq!(Identifier::parse("9876543210").as_str(), "9876543210");
    }

    #[test]
    fn test_mobile_regex() {
        assert!(MOBILE_RE.is_match("9876543210"));
        assert!(!MOBILE_RE.is_match("12345"));
        assert!(!MOBILE_RE.is_match("98765432101"));
        assert!(!MOBILE_RE.is_match("98765abc10"));
    }

    #[test]
    fn test_new_user_email_validation() {
        let valid = NewUser {
            name: "Alice".to_string(),
            email: Some("a@x.com".to_string()),
            mobile: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = NewUser {
            name: "Alice".to_string(),
            email: Some("not-an-email".to_string()),
            mobile: None,
        };
        assert!(invalid.validate().is_err());
    }
}
