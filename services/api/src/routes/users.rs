//! User routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{CurrentUser, auth_middleware},
    models::{NewUser, Pagination},
    repositories::user,
    state::AppState,
    validation::validate_new_user,
};

pub fn router(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .route("/users/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/:hint", get(get_user))
        .merge(protected_routes)
}

/// Get all users
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let users = user::list_users(&mut conn, page)
        .await
        .inspect_err(|e| error!("Failed to get users: {}", e))?;

    Ok(Json(users))
}

/// Sign up a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    validate_new_user(&payload).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut tx = state.db_pool.begin().await?;
    let user = user::create_user(&mut tx, &payload)
        .await
        .inspect_err(|e| error!("Failed to create user: {}", e))?;
    tx.commit().await?;

    info!("Created user: {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID, email or name
pub async fn get_user(
    State(state): State<AppState>,
    Path(hint): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let mut conn = state.db_pool.acquire().await?;
    let user = user::find_user(&mut conn, &hint)
        .await
        .inspect_err(|e| error!("Failed to get user: {}", e))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// The user behind the request's bearer token
pub async fn current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> impl IntoResponse {
    Json(user)
}
