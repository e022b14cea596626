use crate::error::Result;
use chrono::{Duration, Utc};
use festx_database::LoginAttemptRepository;
use festx_models::NewLoginAttempt;

/// Failed-login throttle over the `login_attempts` table.
///
/// Keyed by the raw identifier string whether or not it resolves to a user,
/// so the check itself reveals nothing about which identifiers exist. The
/// window slides: it is always measured back from "now", never a fixed
/// bucket.
pub struct LoginThrottle {
    attempts: LoginAttemptRepository,
    window: Duration,
    max_failures: i64,
}

impl LoginThrottle {
    pub fn new(attempts: LoginAttemptRepository, window_minutes: i64, max_failures: i64) -> Self {
        Self {
            attempts,
            window: Duration::minutes(window_minutes),
            max_failures,
        }
    }

    /// True when the identifier has hit the failure cap inside the trailing
    /// window. Called before any credential lookup or bcrypt work.
    pub async fn too_many_failed_attempts(&self, identifier: &str) -> Result<bool> {
        let since = Utc::now() - self.window;
        let failed = self.attempts.failed_count_since(identifier, since).await?;

        if failed >= self.max_failures {
            tracing::warn!(
                "Login throttled for identifier after {} failed attempts",
                failed
            );
            return Ok(true);
        }

        Ok(false)
    }

    /// Append an attempt record.
    pub async fn record_attempt(
        &self,
        identifier: &str,
        ip_address: &str,
        success: bool,
    ) -> Result<()> {
        self.attempts
            .record(&NewLoginAttempt {
                identifier,
                ip_address,
                success,
            })
            .await?;

        Ok(())
    }
}
