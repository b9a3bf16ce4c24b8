use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::tag::Tag;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub todo_id: i64,
    pub title: String,
    pub content: String,
    pub version: i64,
    /// Referenced tags, loaded by join after the row itself is fetched.
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TodoPostForm {
    #[validate(length(min = 1, max = 30))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub content: String,
    pub tags: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TodoPutForm {
    #[validate(length(min = 1, max = 30))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub content: String,
    pub tags: Vec<i64>,
    pub version: i64,
}

#[derive(Debug, Deserialize)]
pub struct TodoDeleteForm {
    pub version: i64,
}

/// Filter for todo listing: optional title substring and result limit.
/// A non-positive limit is rejected at the boundary; SQLite would read a
/// negative LIMIT as unlimited.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TodoListQuery {
    pub title: Option<String>,
    #[validate(range(min = 1))]
    pub limit: Option<i64>,
}
