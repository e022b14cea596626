use crate::error::{DatabaseError, Result};
use festx_models::{Event, EventRegistration, NewEventRegistration};
use sqlx::PgPool;
use uuid::Uuid;

pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all events, soonest first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY start_date ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Event", &id.to_string()))?;

        Ok(event)
    }

    /// Register a user for an event.
    ///
    /// The exists/duplicate checks inside the transaction only produce
    /// friendlier errors; the UNIQUE (event_id, user_id) constraint is the
    /// real guard against two concurrent registrations.
    pub async fn register(&self, reg: &NewEventRegistration) -> Result<EventRegistration> {
        let mut tx = self.pool.begin().await?;

        let event_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM events WHERE id = $1")
            .bind(reg.event_id)
            .fetch_optional(&mut *tx)
            .await?;

        if event_exists.is_none() {
            return Err(DatabaseError::not_found("Event", &reg.event_id.to_string()));
        }

        let already_registered: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM event_registrations WHERE event_id = $1 AND user_id = $2",
        )
        .bind(reg.event_id)
        .bind(reg.user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if already_registered.is_some() {
            return Err(DatabaseError::duplicate("Registration", "event"));
        }

        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations (event_id, user_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(reg.event_id)
        .bind(reg.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if DatabaseError::is_unique_violation(&e) {
                DatabaseError::duplicate("Registration", "event")
            } else {
                e.into()
            }
        })?;

        tx.commit().await?;

        Ok(registration)
    }

    /// Get a user's registrations, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<EventRegistration>> {
        let registrations = sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT * FROM event_registrations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }
}
