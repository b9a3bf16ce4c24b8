use sqlx::SqliteExecutor;

use crate::models::todo::{Todo, TodoListQuery};

pub async fn insert(
    executor: impl SqliteExecutor<'_>,
    title: &str,
    content: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO todo (title, content, version) VALUES ($1, $2, 0)")
        .bind(title)
        .bind(content)
        .execute(executor)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn select_by_id(
    executor: impl SqliteExecutor<'_>,
    todo_id: i64,
) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>(
        "SELECT todo_id, title, content, version FROM todo WHERE todo_id = $1",
    )
    .bind(todo_id)
    .fetch_optional(executor)
    .await
}

pub async fn select_all(
    executor: impl SqliteExecutor<'_>,
    filter: &TodoListQuery,
) -> Result<Vec<Todo>, sqlx::Error> {
    let mut sql = String::from("SELECT todo_id, title, content, version FROM todo");
    if filter.title.is_some() {
        sql.push_str(" WHERE title LIKE ?");
    }
    sql.push_str(" ORDER BY todo_id");
    if filter.limit.is_some() {
        sql.push_str(" LIMIT ?");
    }

    let mut query = sqlx::query_as::<_, Todo>(&sql);
    if let Some(title) = &filter.title {
        query = query.bind(format!("%{title}%"));
    }
    if let Some(limit) = filter.limit {
        query = query.bind(limit);
    }

    query.fetch_all(executor).await
}

/// Conditional update on id and the caller's observed version. Returns the
/// affected-row count; zero means the precondition was not met.
pub async fn update(
    executor: impl SqliteExecutor<'_>,
    todo_id: i64,
    title: &str,
    content: &str,
    version: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE todo
        SET title = $1, content = $2, version = version + 1
        WHERE todo_id = $3 AND version = $4
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(todo_id)
    .bind(version)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Conditional delete on id and the caller's observed version.
pub async fn delete(
    executor: impl SqliteExecutor<'_>,
    todo_id: i64,
    version: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todo WHERE todo_id = $1 AND version = $2")
        .bind(todo_id)
        .bind(version)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
