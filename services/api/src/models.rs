//! API models for request and response payloads

use serde::Deserialize;

pub mod image;
pub mod object_data;
pub mod session;
pub mod tag;
pub mod token;
pub mod user;

// Re-export for convenience
pub use image::{ANY_OWNER, Image, ImageQuery, NewImage};
pub use object_data::{NewObjectData, ObjectData};
pub use session::{NewSession, Session};
pub use tag::{NewTag, Tag};
pub use token::{LoginCredentials, Token, TokenResolution};
pub use user::{NewUser, User};

/// Offset/limit paging shared by every listing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    /// Number of rows to skip
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of rows to return
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    pub(crate) fn offset(&self) -> i64 {
        i64::from(self.skip)
    }

    pub(crate) fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}
