//! Session model and related functionality
//!
//! A session is a named collaborative resource with an owner, a set of member
//! users and a set of tags.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Tag, User};

/// Session entity with its associations loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
    pub members: Vec<User>,
    pub tags: Vec<Tag>,
}

/// Scalar columns of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFields {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// New session creation payload
///
/// Member and tag references are kept apart from the scalar fields; they are
/// resolved after the row is inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    #[serde(flatten)]
    pub fields: SessionFields,
    /// User id, email or name of the owner
    pub owner_id: String,
    /// User ids, emails or names
    #[serde(default)]
    pub members: Vec<String>,
    /// Tag names
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, FromRow)]
pub(crate) struct SessionRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: String,
}

impl SessionRow {
    pub(crate) fn into_session(self, members: Vec<User>, tags: Vec<Tag>) -> Session {
        Session {
            id: self.id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
            members,
            tags,
        }
    }
}
