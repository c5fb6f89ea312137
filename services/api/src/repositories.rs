//! Entity store
//!
//! Every operation borrows an explicit connection handle, which may be a
//! pooled connection or an open transaction. Callers own the handle's scope:
//! they acquire it per request and commit or drop it when the request ends.

pub mod image;
pub mod object_data;
pub mod session;
pub mod tag;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support {
    use common::database::{DatabaseConfig, init_pool};
    use sqlx::{SqliteConnection, SqlitePool};
    use uuid::Uuid;

    use crate::{database::run_migrations, models::User};

    /// Fresh in-memory database with the schema applied
    pub async fn memory_pool() -> SqlitePool {
        let pool = init_pool(&DatabaseConfig::in_memory())
            .await
            .expect("open in-memory pool");
        run_migrations(&pool).await.expect("run migrations");
        pool
    }

    /// Insert a user row directly, skipping the password hashing cost
    pub async fn seed_user(conn: &mut SqliteConnection, name: &str) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            fullname: Some(format!("{} Example", name)),
            email: format!("{}@example.com", name),
            hashed_password: "not-a-real-hash".to_string(),
        };

        sqlx::query(
            "INSERT INTO users (id, name, fullname, email, hashed_password) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.fullname)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .execute(&mut *conn)
        .await
        .expect("seed user");

        user
    }

    pub async fn seed_tag(conn: &mut SqliteConnection, name: &str) {
        sqlx::query("INSERT INTO tags (name, description) VALUES (?, NULL)")
            .bind(name)
            .execute(&mut *conn)
            .await
            .expect("seed tag");
    }
}
