use sqlx::SqliteExecutor;

use crate::models::tag::{Tag, TagListQuery};

pub async fn insert(executor: impl SqliteExecutor<'_>, name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO tag (name, version) VALUES ($1, 0)")
        .bind(name)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn select_by_id(
    executor: impl SqliteExecutor<'_>,
    tag_id: i64,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT tag_id, name, version FROM tag WHERE tag_id = $1")
        .bind(tag_id)
        .fetch_optional(executor)
        .await
}

/// Batch existence lookup: how many of the given distinct ids have a tag row.
pub async fn count_by_ids(
    executor: impl SqliteExecutor<'_>,
    tag_ids: &[i64],
) -> Result<i64, sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; tag_ids.len()].join(", ");
    let sql = format!("SELECT COUNT(*) FROM tag WHERE tag_id IN ({placeholders})");

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for tag_id in tag_ids {
        query = query.bind(*tag_id);
    }

    query.fetch_one(executor).await
}

pub async fn select_all(
    executor: impl SqliteExecutor<'_>,
    filter: &TagListQuery,
) -> Result<Vec<Tag>, sqlx::Error> {
    let mut sql = String::from("SELECT tag_id, name, version FROM tag");
    if filter.name.is_some() {
        sql.push_str(" WHERE name LIKE ?");
    }
    sql.push_str(" ORDER BY tag_id");

    let mut query = sqlx::query_as::<_, Tag>(&sql);
    if let Some(name) = &filter.name {
        query = query.bind(format!("%{name}%"));
    }

    query.fetch_all(executor).await
}

pub async fn select_by_todo_id(
    executor: impl SqliteExecutor<'_>,
    todo_id: i64,
) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.tag_id, t.name, t.version
        FROM tag t
        JOIN todo_tag tt ON tt.tag_id = t.tag_id
        WHERE tt.todo_id = $1
        ORDER BY t.tag_id
        "#,
    )
    .bind(todo_id)
    .fetch_all(executor)
    .await
}

/// Conditional update on id and the caller's observed version. Returns the
/// affected-row count; zero means the precondition was not met.
pub async fn update(
    executor: impl SqliteExecutor<'_>,
    tag_id: i64,
    name: &str,
    version: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tag SET name = $1, version = version + 1 WHERE tag_id = $2 AND version = $3",
    )
    .bind(name)
    .bind(tag_id)
    .bind(version)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Conditional delete on id and the caller's observed version.
pub async fn delete(
    executor: impl SqliteExecutor<'_>,
    tag_id: i64,
    version: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tag WHERE tag_id = $1 AND version = $2")
        .bind(tag_id)
        .bind(version)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
