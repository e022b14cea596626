use crate::error::Result;
use chrono::{DateTime, Utc};
use festx_models::NewLoginAttempt;
use sqlx::PgPool;

pub struct LoginAttemptRepository {
    pool: PgPool,
}

impl LoginAttemptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a login attempt
    pub async fn record(&self, attempt: &NewLoginAttempt<'_>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (identifier, ip_address, success)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(attempt.identifier)
        .bind(attempt.ip_address)
        .bind(attempt.success)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count failed attempts for an identifier since the given instant.
    /// The caller computes `since` from "now − window" so the window slides.
    pub async fn failed_count_since(
        &self,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM login_attempts
            WHERE identifier = $1
              AND success = false
              AND attempted_at > $2
            "#,
        )
        .bind(identifier)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
