//! Generic object-data records

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

/// Object-data entity holding an arbitrary JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    pub id: String,
    pub name: String,
    pub data: serde_json::Value,
}

/// New object-data creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewObjectData {
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, FromRow)]
pub(crate) struct ObjectDataRow {
    pub id: String,
    pub name: String,
    pub data: Json<serde_json::Value>,
}

impl From<ObjectDataRow> for ObjectData {
    fn from(row: ObjectDataRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            data: row.data.0,
        }
    }
}
