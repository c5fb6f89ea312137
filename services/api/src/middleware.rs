//! Bearer token authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::{debug, error};

use crate::{
    error::ApiError,
    models::{TokenResolution, User},
    repositories::token,
    state::AppState,
};

/// The user a request's bearer token resolved to
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolve the bearer token and expose its user to handlers
///
/// Resolution runs in its own transaction so the sliding expiry is committed
/// before the handler starts.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let mut tx = state.db_pool.begin().await?;
    let resolution = token::resolve_token(&mut tx, state.clock.as_ref(), bearer.token())
        .await
        .map_err(|e| {
            error!("Failed to resolve token: {}", e);
            ApiError::InternalServerError
        })?;
    tx.commit().await?;

    let user = match resolution {
        TokenResolution::Authenticated(user) => user,
        TokenResolution::Expired => return Err(ApiError::TokenExpired),
        TokenResolution::Absent => return Err(ApiError::Unauthorized),
    };

    debug!("Authenticated request for user: {}", user.id);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
