//! Login and token management routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{CurrentUser, auth_middleware},
    models::{LoginCredentials, Pagination},
    repositories::{token, user},
    state::AppState,
};

pub fn router(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .route("/tokens", get(list_tokens))
        .route("/tokens/", get(list_tokens))
        .route("/tokens/:id", delete(delete_token))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(login))
        .merge(protected_routes)
}

/// Exchange credentials for a fresh bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for user: {}", payload.username);

    let mut tx = state.db_pool.begin().await?;
    let user = user::authenticate(&mut tx, &payload.username, &payload.password)
        .await
        .inspect_err(|e| error!("Failed to authenticate user: {}", e))?
        .ok_or(ApiError::Unauthorized)?;

    let token = token::create_token(&mut tx, state.clock.as_ref(), &user.id)
        .await
        .inspect_err(|e| error!("Failed to create token: {}", e))?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(token)))
}

/// List the caller's tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(page): Query<Pagination>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let tokens = token::list_user_tokens(&mut conn, &user.id, page)
        .await
        .inspect_err(|e| error!("Failed to list tokens: {}", e))?;

    Ok(Json(tokens))
}

/// Revoke one of the caller's tokens
pub async fn delete_token(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut tx = state.db_pool.begin().await?;
    let deleted = token::delete_token(&mut tx, &id, &user.id)
        .await
        .inspect_err(|e| error!("Failed to delete token: {}", e))?;
    tx.commit().await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Token not found".to_string()))
    }
}
