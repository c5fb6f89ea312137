//! Image routes
//!
//! Listing and reading are public; uploading requires a bearer token and the
//! upload is owned by the token's user.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{CurrentUser, auth_middleware},
    models::{ImageQuery, NewImage},
    repositories::image,
    state::AppState,
};

pub fn router(state: AppState) -> Router<AppState> {
    let authenticated = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/images",
            get(list_images).post(create_image.layer(authenticated.clone())),
        )
        .route(
            "/images/",
            get(list_images).post(create_image.layer(authenticated)),
        )
        .route("/images/:id", get(get_image))
}

/// List images, filtered by `owner` (`*` for all)
pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let images = image::list_images(&mut conn, query.pagination(), &query.owner)
        .await
        .inspect_err(|e| error!("Failed to list images: {}", e))?;

    Ok(Json(images))
}

/// Upload an image owned by the authenticated user
pub async fn create_image(
    State(state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    Json(payload): Json<NewImage>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;
    let image = image::create_image(&mut tx, payload, &owner.id)
        .await
        .inspect_err(|e| error!("Failed to create image: {}", e))?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(image)))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let image = image::get_image(&mut conn, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Image not found".to_string()))?;

    Ok(Json(image))
}
