//! Session routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    models::{NewSession, Pagination},
    repositories::{session, user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/", get(list_sessions).post(create_session))
        .route("/sessions/:id", get(get_session))
}

/// List sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let sessions = session::list_sessions(&mut conn, page)
        .await
        .inspect_err(|e| error!("Failed to list sessions: {}", e))?;

    Ok(Json(sessions))
}

/// Create a session; the owner must resolve to an existing user
pub async fn create_session(
    State(state): State<AppState>,
    Json(mut payload): Json<NewSession>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;

    let owner = user::find_user(&mut tx, &payload.owner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Owner not found".to_string()))?;
    payload.owner_id = owner.id;

    let session = session::create_session(&mut tx, payload)
        .await
        .inspect_err(|e| error!("Failed to create session: {}", e))?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Get a session by ID
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let session = session::get_session(&mut conn, &id)
        .await
        .inspect_err(|e| error!("Failed to get session: {}", e))?
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    Ok(Json(session))
}
