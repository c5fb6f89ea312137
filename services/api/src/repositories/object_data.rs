//! Object-data repository

use common::error::DatabaseResult;
use sqlx::{SqliteConnection, types::Json};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewObjectData, ObjectData, Pagination, object_data::ObjectDataRow};

pub async fn get_object_data(
    conn: &mut SqliteConnection,
    object_id: &str,
) -> DatabaseResult<Option<ObjectData>> {
    let row = sqlx::query_as::<_, ObjectDataRow>(
        "SELECT id, name, data FROM object_data WHERE id = ?",
    )
    .bind(object_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(ObjectData::from))
}

pub async fn list_object_data(
    conn: &mut SqliteConnection,
    page: Pagination,
) -> DatabaseResult<Vec<ObjectData>> {
    let rows = sqlx::query_as::<_, ObjectDataRow>(
        "SELECT id, name, data FROM object_data ORDER BY rowid LIMIT ? OFFSET ?",
    )
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(ObjectData::from).collect())
}

pub async fn create_object_data(
    conn: &mut SqliteConnection,
    new_object: &NewObjectData,
) -> DatabaseResult<ObjectData> {
    let object_id = Uuid::new_v4().to_string();
    info!("Creating object data {}: {}", object_id, new_object.name);

    sqlx::query("INSERT INTO object_data (id, name, data) VALUES (?, ?, ?)")
        .bind(&object_id)
        .bind(&new_object.name)
        .bind(Json(&new_object.data))
        .execute(&mut *conn)
        .await?;

    Ok(ObjectData {
        id: object_id,
        name: new_object.name.clone(),
        data: new_object.data.clone(),
    })
}
