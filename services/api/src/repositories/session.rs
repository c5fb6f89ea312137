//! Session repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqliteConnection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    models::{NewSession, Pagination, Session, Tag, User, session::SessionRow},
    repositories::{tag, user},
};

async fn load_members(conn: &mut SqliteConnection, session_id: &str) -> DatabaseResult<Vec<User>> {
    let members = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.name, u.fullname, u.email, u.hashed_password
        FROM users u
        JOIN session_members m ON m.user_id = u.id
        WHERE m.session_id = ?
        ORDER BY m.rowid
        "#,
    )
    .bind(session_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(members)
}

async fn load_tags(conn: &mut SqliteConnection, session_id: &str) -> DatabaseResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.name, t.description
        FROM tags t
        JOIN session_tags st ON st.tag_name = t.name
        WHERE st.session_id = ?
        ORDER BY st.rowid
        "#,
    )
    .bind(session_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(tags)
}

async fn hydrate(conn: &mut SqliteConnection, row: SessionRow) -> DatabaseResult<Session> {
    let members = load_members(&mut *conn, &row.id).await?;
    let tags = load_tags(&mut *conn, &row.id).await?;
    Ok(row.into_session(members, tags))
}

/// Get a session by ID
pub async fn get_session(
    conn: &mut SqliteConnection,
    session_id: &str,
) -> DatabaseResult<Option<Session>> {
    let row = sqlx::query_as::<_, SessionRow>(
        "SELECT id, name, description, owner_id FROM sessions WHERE id = ?",
    )
    .bind(session_id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(Some(hydrate(conn, row).await?)),
        None => Ok(None),
    }
}

/// List sessions in storage order
pub async fn list_sessions(
    conn: &mut SqliteConnection,
    page: Pagination,
) -> DatabaseResult<Vec<Session>> {
    let rows = sqlx::query_as::<_, SessionRow>(
        r#"
        SELECT id, name, description, owner_id
        FROM sessions
        ORDER BY rowid
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&mut *conn)
    .await?;

    let mut sessions = Vec::with_capacity(rows.len());
    for row in rows {
        sessions.push(hydrate(&mut *conn, row).await?);
    }

    Ok(sessions)
}

/// Create a session and attach its members and tags
///
/// The owner is always a member. Member and tag references that do not
/// resolve are skipped.
pub async fn create_session(
    conn: &mut SqliteConnection,
    new_session: NewSession,
) -> DatabaseResult<Session> {
    let NewSession {
        fields,
        owner_id,
        members,
        tags,
    } = new_session;

    let session_id = Uuid::new_v4().to_string();
    info!("Creating session {} owned by {}", session_id, owner_id);

    let mut member_refs = Vec::with_capacity(members.len() + 1);
    member_refs.push(owner_id.clone());
    member_refs.extend(members);

    sqlx::query("INSERT INTO sessions (id, name, description, owner_id) VALUES (?, ?, ?, ?)")
        .bind(&session_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&owner_id)
        .execute(&mut *conn)
        .await?;

    for reference in &member_refs {
        match user::find_user(&mut *conn, reference).await? {
            Some(member) => {
                sqlx::query(
                    "INSERT OR IGNORE INTO session_members (session_id, user_id) VALUES (?, ?)",
                )
                .bind(&session_id)
                .bind(&member.id)
                .execute(&mut *conn)
                .await?;
            }
            None => debug!("Skipping unknown member: {}", reference),
        }
    }

    for tag_name in &tags {
        match tag::get_tag(&mut *conn, tag_name).await? {
            Some(tag) => {
                sqlx::query(
                    "INSERT OR IGNORE INTO session_tags (session_id, tag_name) VALUES (?, ?)",
                )
                .bind(&session_id)
                .bind(&tag.name)
                .execute(&mut *conn)
                .await?;
            }
            None => debug!("Skipping unknown tag: {}", tag_name),
        }
    }

    get_session(conn, &session_id)
        .await?
        .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
}
