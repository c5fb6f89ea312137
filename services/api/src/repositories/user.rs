//! User repository for database operations

use common::{error::DatabaseResult, password};
use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, Pagination, User};

/// A column a user can be looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup {
    Id,
    Email,
    Name,
}

impl UserLookup {
    fn column(self) -> &'static str {
        match self {
            UserLookup::Id => "id",
            UserLookup::Email => "email",
            UserLookup::Name => "name",
        }
    }
}

/// Order in which [`find_user`] tries each lookup; first hit wins
pub const LOOKUP_ORDER: [UserLookup; 3] = [UserLookup::Id, UserLookup::Email, UserLookup::Name];

/// Find a user by a single column
pub async fn find_user_by(
    conn: &mut SqliteConnection,
    lookup: UserLookup,
    value: &str,
) -> DatabaseResult<Option<User>> {
    let sql = format!(
        "SELECT id, name, fullname, email, hashed_password FROM users WHERE {} = ?",
        lookup.column()
    );

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(value)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(user)
}

/// Find a user by ID
pub async fn find_user_by_id(conn: &mut SqliteConnection, id: &str) -> DatabaseResult<Option<User>> {
    find_user_by(conn, UserLookup::Id, id).await
}

/// Find a user by email
#[cfg_attr(not(test), allow(dead_code))]
pub async fn find_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> DatabaseResult<Option<User>> {
    find_user_by(conn, UserLookup::Email, email).await
}

/// Find a user by name
#[cfg_attr(not(test), allow(dead_code))]
pub async fn find_user_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> DatabaseResult<Option<User>> {
    find_user_by(conn, UserLookup::Name, name).await
}

/// Find a user by any identifying field: id, then email, then name
pub async fn find_user(conn: &mut SqliteConnection, hint: &str) -> DatabaseResult<Option<User>> {
    for lookup in LOOKUP_ORDER {
        if let Some(user) = find_user_by(&mut *conn, lookup, hint).await? {
            return Ok(Some(user));
        }
    }

    Ok(None)
}

/// List users in storage order
pub async fn list_users(conn: &mut SqliteConnection, page: Pagination) -> DatabaseResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, fullname, email, hashed_password
        FROM users
        ORDER BY rowid
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(users)
}

/// Create a new user
///
/// Duplicate names or emails are rejected by the storage constraints and
/// surface as a conflict.
pub async fn create_user(conn: &mut SqliteConnection, new_user: &NewUser) -> DatabaseResult<User> {
    info!("Creating new user: {}", new_user.name);

    let hashed_password = password::hash_password(&new_user.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, fullname, email, hashed_password)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, fullname, email, hashed_password
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&new_user.name)
    .bind(&new_user.fullname)
    .bind(&new_user.email)
    .bind(&hashed_password)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

/// Resolve a user by any identifier and check their password
pub async fn authenticate(
    conn: &mut SqliteConnection,
    hint: &str,
    password: &str,
) -> DatabaseResult<Option<User>> {
    info!("Authenticating user: {}", hint);

    let Some(user) = find_user(conn, hint).await? else {
        return Ok(None);
    };

    if password::verify_password(password, &user.hashed_password)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
