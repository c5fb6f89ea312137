//! Tag routes

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
    models::{NewTag, Pagination},
    repositories::tag,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/", get(list_tags).post(create_tag))
        .route("/tags/:name", get(get_tag))
}

pub async fn list_tags(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let tags = tag::list_tags(&mut conn, page)
        .await
        .inspect_err(|e| error!("Failed to list tags: {}", e))?;

    Ok(Json(tags))
}

pub async fn create_tag(
    State(state): State<AppState>,
    Json(payload): Json<NewTag>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Tag name is required".to_string()));
    }

    let mut tx = state.db_pool.begin().await?;
    let tag = tag::create_tag(&mut tx, &payload)
        .await
        .inspect_err(|e| error!("Failed to create tag: {}", e))?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let tag = tag::get_tag(&mut conn, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

    Ok(Json(tag))
}
