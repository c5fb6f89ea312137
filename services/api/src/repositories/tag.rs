//! Tag repository

use common::error::DatabaseResult;
use sqlx::SqliteConnection;
use tracing::info;

use crate::models::{NewTag, Pagination, Tag};

/// Find a tag by its name
pub async fn get_tag(conn: &mut SqliteConnection, name: &str) -> DatabaseResult<Option<Tag>> {
    let tag = sqlx::query_as::<_, Tag>("SELECT name, description FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(tag)
}

pub async fn list_tags(conn: &mut SqliteConnection, page: Pagination) -> DatabaseResult<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT name, description FROM tags ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(tags)
}

/// Create a tag; a duplicate name is a conflict
pub async fn create_tag(conn: &mut SqliteConnection, new_tag: &NewTag) -> DatabaseResult<Tag> {
    info!("Creating tag: {}", new_tag.name);

    let tag = sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (name, description) VALUES (?, ?) RETURNING name, description",
    )
    .bind(&new_tag.name)
    .bind(&new_tag.description)
    .fetch_one(&mut *conn)
    .await?;

    Ok(tag)
}
