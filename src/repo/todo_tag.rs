use sqlx::{SqliteConnection, SqliteExecutor};

/// Bulk-insert junction rows binding a todo to each tag id. Takes a connection
/// rather than an executor so it can issue one statement per row inside the
/// caller's transaction.
pub async fn insert_links(
    conn: &mut SqliteConnection,
    todo_id: i64,
    tag_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for tag_id in tag_ids {
        sqlx::query("INSERT INTO todo_tag (todo_id, tag_id) VALUES ($1, $2)")
            .bind(todo_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

pub async fn delete_by_todo_id(
    executor: impl SqliteExecutor<'_>,
    todo_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM todo_tag WHERE todo_id = $1")
        .bind(todo_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn delete_by_tag_id(
    executor: impl SqliteExecutor<'_>,
    tag_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM todo_tag WHERE tag_id = $1")
        .bind(tag_id)
        .execute(executor)
        .await?;

    Ok(())
}
