//! Schema bootstrap for the entity store

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            fullname TEXT,
            email TEXT NOT NULL UNIQUE,
            hashed_password TEXT NOT NULL
        )
        "#,
    ),
    // user_id carries no foreign key: a token may outlive its owner's row
    (
        "tokens",
        r#"
        CREATE TABLE IF NOT EXISTS tokens (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            user_id TEXT NOT NULL
        )
        "#,
    ),
    (
        "tags",
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            name TEXT PRIMARY KEY,
            description TEXT
        )
        "#,
    ),
    (
        "sessions",
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            owner_id TEXT NOT NULL
        )
        "#,
    ),
    (
        "session_members",
        r#"
        CREATE TABLE IF NOT EXISTS session_members (
            session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            PRIMARY KEY (session_id, user_id)
        )
        "#,
    ),
    (
        "session_tags",
        r#"
        CREATE TABLE IF NOT EXISTS session_tags (
            session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            tag_name TEXT NOT NULL REFERENCES tags(name) ON DELETE CASCADE,
            PRIMARY KEY (session_id, tag_name)
        )
        "#,
    ),
    (
        "images",
        r#"
        CREATE TABLE IF NOT EXISTS images (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL,
            image TEXT NOT NULL
        )
        "#,
    ),
    (
        "image_tags",
        r#"
        CREATE TABLE IF NOT EXISTS image_tags (
            image_id TEXT NOT NULL REFERENCES images(id) ON DELETE CASCADE,
            tag_name TEXT NOT NULL REFERENCES tags(name) ON DELETE CASCADE,
            PRIMARY KEY (image_id, tag_name)
        )
        "#,
    ),
    (
        "image_models",
        r#"
        CREATE TABLE IF NOT EXISTS image_models (
            image_id TEXT NOT NULL REFERENCES images(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            PRIMARY KEY (image_id, user_id)
        )
        "#,
    ),
    (
        "object_data",
        r#"
        CREATE TABLE IF NOT EXISTS object_data (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            data TEXT NOT NULL
        )
        "#,
    ),
];

/// Create every table the entity store needs; safe to run repeatedly
pub async fn run_migrations(pool: &SqlitePool) -> DatabaseResult<()> {
    for (table, ddl) in SCHEMA {
        sqlx::query(ddl).execute(pool).await.map_err(|e| {
            DatabaseError::Migration(format!("failed to create {} table: {}", table, e))
        })?;
    }

    info!("database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::{DatabaseConfig, init_pool};

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        for (table, _) in SCHEMA {
            assert!(tables.iter().any(|t| t == table), "missing table {table}");
        }
    }
}
