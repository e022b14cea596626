use crate::error::{DatabaseError, Result};
use festx_models::user::{Identifier, NewUser};
use festx_models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user. Unique violations on email or mobile are surfaced
    /// as `DuplicateEntry` naming the offending field, never as a raw driver
    /// error.
    pub async fn create(&self, new_user: &NewUser, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, mobile, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.mobile)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if DatabaseError::is_unique_violation(&e) {
                let field = match DatabaseError::violated_constraint(&e).as_deref() {
                    Some("users_email_key") => "email",
                    Some("users_mobile_key") => "mobile",
                    _ => "identity",
                };
                DatabaseError::duplicate("User", field)
            } else {
                e.into()
            }
        })?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", &id.to_string()))?;

        Ok(user)
    }

    /// Look up a user by a boundary-parsed identifier. The variant decides
    /// the column; the raw string is never re-inspected here.
    pub async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<User>> {
        let query = match identifier {
            Identifier::Email(_) => "SELECT * FROM users WHERE email = $1",
            Identifier::Mobile(_) => "SELECT * FROM users WHERE mobile = $1",
        };

        let user = sqlx::query_as::<_, User>(query)
            .bind(identifier.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Update last login timestamp
    pub async fn update_last_login(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Soft delete user (deactivate)
    pub async fn deactivate(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET is_active = false, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
