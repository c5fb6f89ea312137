//! Bearer token model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::User;

/// Token entity; the id doubles as the bearer value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Token {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
}

/// User login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// User id, email or name
    pub username: String,
    pub password: String,
}

/// Outcome of presenting a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResolution {
    /// No such token, or its owner no longer exists
    Absent,
    /// The token exists but its lifetime ran out
    Expired,
    /// The token is live and its lifetime was extended
    Authenticated(User),
}
