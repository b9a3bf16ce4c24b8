use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_id: i64,
    pub name: String,
    pub version: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagPostForm {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagPutForm {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    pub version: i64,
}

#[derive(Debug, Deserialize)]
pub struct TagDeleteForm {
    pub version: i64,
}

/// Filter for tag listing. Pass-through, no existence semantics.
#[derive(Debug, Default, Deserialize)]
pub struct TagListQuery {
    pub name: Option<String>,
}
