//! Image repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqliteConnection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    models::{ANY_OWNER, Image, NewImage, Pagination, Tag, User, image::ImageRow},
    repositories::{tag, user},
};

async fn hydrate(conn: &mut SqliteConnection, row: ImageRow) -> DatabaseResult<Image> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.name, t.description
        FROM tags t
        JOIN image_tags it ON it.tag_name = t.name
        WHERE it.image_id = ?
        ORDER BY it.rowid
        "#,
    )
    .bind(&row.id)
    .fetch_all(&mut *conn)
    .await?;

    let models = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.name, u.fullname, u.email, u.hashed_password
        FROM users u
        JOIN image_models im ON im.user_id = u.id
        WHERE im.image_id = ?
        ORDER BY im.rowid
        "#,
    )
    .bind(&row.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(row.into_image(tags, models))
}

/// Get an image by ID
pub async fn get_image(conn: &mut SqliteConnection, image_id: &str) -> DatabaseResult<Option<Image>> {
    let row = sqlx::query_as::<_, ImageRow>(
        "SELECT id, owner_id, name, image FROM images WHERE id = ?",
    )
    .bind(image_id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(Some(hydrate(conn, row).await?)),
        None => Ok(None),
    }
}

/// List images, optionally restricted to one owner
///
/// `owner` is matched exactly against `owner_id`; [`ANY_OWNER`] disables the
/// filter.
pub async fn list_images(
    conn: &mut SqliteConnection,
    page: Pagination,
    owner: &str,
) -> DatabaseResult<Vec<Image>> {
    let rows = if owner == ANY_OWNER {
        sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT id, owner_id, name, image
            FROM images
            ORDER BY rowid
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?
    } else {
        sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT id, owner_id, name, image
            FROM images
            WHERE owner_id = ?
            ORDER BY rowid
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(owner)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?
    };

    let mut images = Vec::with_capacity(rows.len());
    for row in rows {
        images.push(hydrate(&mut *conn, row).await?);
    }

    Ok(images)
}

/// Create an image owned by `owner` and attach its tags and models
///
/// Tag names and model references that do not resolve are skipped.
pub async fn create_image(
    conn: &mut SqliteConnection,
    new_image: NewImage,
    owner: &str,
) -> DatabaseResult<Image> {
    let NewImage {
        fields,
        tags,
        model_ids,
    } = new_image;

    let image_id = Uuid::new_v4().to_string();
    info!("Creating image {} owned by {}", image_id, owner);

    sqlx::query("INSERT INTO images (id, owner_id, name, image) VALUES (?, ?, ?, ?)")
        .bind(&image_id)
        .bind(owner)
        .bind(&fields.name)
        .bind(&fields.image)
        .execute(&mut *conn)
        .await?;

    for tag_name in &tags {
        match tag::get_tag(&mut *conn, tag_name).await? {
            Some(tag) => {
                sqlx::query("INSERT OR IGNORE INTO image_tags (image_id, tag_name) VALUES (?, ?)")
                    .bind(&image_id)
                    .bind(&tag.name)
                    .execute(&mut *conn)
                    .await?;
            }
            None => debug!("Skipping unknown tag: {}", tag_name),
        }
    }

    for reference in &model_ids {
        match user::find_user(&mut *conn, reference).await? {
            Some(model) => {
                sqlx::query(
                    "INSERT OR IGNORE INTO image_models (image_id, user_id) VALUES (?, ?)",
                )
                .bind(&image_id)
                .bind(&model.id)
                .execute(&mut *conn)
                .await?;
            }
            None => debug!("Skipping unknown model: {}", reference),
        }
    }

    get_image(conn, &image_id)
        .await?
        .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
}
