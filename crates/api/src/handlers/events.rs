use crate::handlers::auth::ErrorResponse;
use crate::middleware::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use festx_database::DatabaseError;
use festx_models::{Event, EventRegistration, NewEventRegistration};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

fn db_error_response(e: DatabaseError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match &e {
        DatabaseError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        DatabaseError::DuplicateEntry(msg) => (StatusCode::CONFLICT, msg.clone()),
        _ => {
            tracing::error!("Database error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        }
    };

    (status, Json(ErrorResponse::new(&message)))
}

/// List all events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Event>>>, (StatusCode, Json<ErrorResponse>)> {
    let events = state.events.list().await.map_err(db_error_response)?;

    Ok(Json(DataResponse::new(events)))
}

/// Get a single event
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Event>>, (StatusCode, Json<ErrorResponse>)> {
    let event = state.events.find_by_id(id).await.map_err(db_error_response)?;

    Ok(Json(DataResponse::new(event)))
}

/// Register the authenticated user for an event
pub async fn register_for_event(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<DataResponse<EventRegistration>>), (StatusCode, Json<ErrorResponse>)>
{
    let registration = state
        .events
        .register(&NewEventRegistration {
            event_id: id,
            user_id: user.id,
        })
        .await
        .map_err(db_error_response)?;

    tracing::info!("User {} registered for event {}", user.id, id);

    Ok((StatusCode::CREATED, Json(DataResponse::new(registration))))
}

/// List the authenticated user's registrations
pub async fn my_registrations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DataResponse<Vec<EventRegistration>>>, (StatusCode, Json<ErrorResponse>)> {
    let registrations = state
        .events
        .list_for_user(user.id)
        .await
        .map_err(db_error_response)?;

    Ok(Json(DataResponse::new(registrations)))
}
