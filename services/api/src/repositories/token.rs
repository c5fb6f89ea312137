//! Token repository: issuance, sliding expiry and revocation

use chrono::Duration;
use common::{clock::Clock, error::DatabaseResult};
use sqlx::SqliteConnection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    models::{Pagination, Token, TokenResolution},
    repositories::user,
};

/// How long a token stays valid after issuance or its last use
pub const TOKEN_LIFETIME: Duration = Duration::minutes(30);

/// Issue a new token for `user_id`
///
/// The user is not checked for existence.
pub async fn create_token(
    conn: &mut SqliteConnection,
    clock: &dyn Clock,
    user_id: &str,
) -> DatabaseResult<Token> {
    info!("Creating token for user: {}", user_id);

    let created_at = clock.now();
    let token = Token {
        id: Uuid::new_v4().to_string(),
        created_at,
        expires_at: created_at + TOKEN_LIFETIME,
        user_id: user_id.to_string(),
    };

    sqlx::query("INSERT INTO tokens (id, created_at, expires_at, user_id) VALUES (?, ?, ?, ?)")
        .bind(&token.id)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(&token.user_id)
        .execute(&mut *conn)
        .await?;

    Ok(token)
}

/// Find a token by its bearer value
pub async fn get_token(conn: &mut SqliteConnection, token_id: &str) -> DatabaseResult<Option<Token>> {
    let token = sqlx::query_as::<_, Token>(
        "SELECT id, created_at, expires_at, user_id FROM tokens WHERE id = ?",
    )
    .bind(token_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(token)
}

/// Resolve a bearer token to its user, extending the token on success
///
/// An expired token is reported as such and left untouched. A live token is
/// extended to a full lifetime from now even if its owner has since gone
/// missing, in which case the result is [`TokenResolution::Absent`].
pub async fn resolve_token(
    conn: &mut SqliteConnection,
    clock: &dyn Clock,
    token_id: &str,
) -> DatabaseResult<TokenResolution> {
    let Some(token) = get_token(&mut *conn, token_id).await? else {
        debug!("Unknown token presented");
        return Ok(TokenResolution::Absent);
    };

    let now = clock.now();
    if token.expires_at < now {
        debug!("Expired token presented for user: {}", token.user_id);
        return Ok(TokenResolution::Expired);
    }

    // Never shorten a lifetime, even if the clock stepped backwards
    let expires_at = (now + TOKEN_LIFETIME).max(token.expires_at);
    sqlx::query("UPDATE tokens SET expires_at = ? WHERE id = ?")
        .bind(expires_at)
        .bind(&token.id)
        .execute(&mut *conn)
        .await?;

    match user::find_user_by_id(&mut *conn, &token.user_id).await? {
        Some(user) => Ok(TokenResolution::Authenticated(user)),
        None => Ok(TokenResolution::Absent),
    }
}

/// List a user's tokens
pub async fn list_user_tokens(
    conn: &mut SqliteConnection,
    user_id: &str,
    page: Pagination,
) -> DatabaseResult<Vec<Token>> {
    let tokens = sqlx::query_as::<_, Token>(
        r#"
        SELECT id, created_at, expires_at, user_id
        FROM tokens
        WHERE user_id = ?
        ORDER BY rowid
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(tokens)
}

/// Delete a token, but only on behalf of its owner
///
/// Returns whether a token was deleted; a token owned by someone else is
/// treated the same as a missing one.
pub async fn delete_token(
    conn: &mut SqliteConnection,
    token_id: &str,
    user_id: &str,
) -> DatabaseResult<bool> {
    info!("Deleting token for user: {}", user_id);

    let result = sqlx::query("DELETE FROM tokens WHERE id = ? AND user_id = ?")
        .bind(token_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
