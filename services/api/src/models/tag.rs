//! Tag model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tag entity, keyed by its unique name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
}

/// New tag creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
