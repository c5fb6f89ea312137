//! Image models for the API service

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Pagination, Tag, User};

/// Owner filter value that matches every image
pub const ANY_OWNER: &str = "*";

/// Image entity with its associations loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub image: String,
    pub tags: Vec<Tag>,
    pub models: Vec<User>,
}

/// Scalar columns of an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFields {
    pub name: String,
    /// Encoded payload, stored in the `image` column
    #[serde(rename = "image_data")]
    pub image: String,
}

/// New image creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewImage {
    #[serde(flatten)]
    pub fields: ImageFields,
    /// Tag names
    #[serde(default)]
    pub tags: Vec<String>,
    /// User ids, emails or names of the people pictured
    #[serde(default)]
    pub model_ids: Vec<String>,
}

/// Query parameters for image listing
#[derive(Debug, Clone, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Owner id to filter on, `*` for every owner
    #[serde(default = "default_owner")]
    pub owner: String,
}

fn default_limit() -> u32 {
    Pagination::default().limit
}

fn default_owner() -> String {
    ANY_OWNER.to_string()
}

impl ImageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ImageRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub image: String,
}

impl ImageRow {
    pub(crate) fn into_image(self, tags: Vec<Tag>, models: Vec<User>) -> Image {
        Image {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            image: self.image,
            tags,
            models,
        }
    }
}
