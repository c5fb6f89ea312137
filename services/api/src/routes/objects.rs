//! Object-data routes

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
    models::{NewObjectData, Pagination},
    repositories::object_data,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/objects", get(list_objects).post(create_object))
        .route("/objects/", get(list_objects).post(create_object))
        .route("/objects/:id", get(get_object))
}

pub async fn list_objects(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let objects = object_data::list_object_data(&mut conn, page)
        .await
        .inspect_err(|e| error!("Failed to list object data: {}", e))?;

    Ok(Json(objects))
}

pub async fn create_object(
    State(state): State<AppState>,
    Json(payload): Json<NewObjectData>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;
    let object = object_data::create_object_data(&mut tx, &payload)
        .await
        .inspect_err(|e| error!("Failed to create object data: {}", e))?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(object)))
}

pub async fn get_object(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let object = object_data::get_object_data(&mut conn, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Object not found".to_string()))?;

    Ok(Json(object))
}
