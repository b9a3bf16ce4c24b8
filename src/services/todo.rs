use std::collections::BTreeSet;

use crate::db::Database;
use crate::error::AppResult;
use crate::models::todo::{Todo, TodoListQuery};
use crate::repo;
use crate::services::consistency;

pub struct TodoService<'a> {
    db: &'a Database,
}

/// Incoming tag references carry set semantics; duplicates collapse before any
/// check or junction write.
fn distinct_ids(ids: &[i64]) -> Vec<i64> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl<'a> TodoService<'a> {
    pub fn new(db: &'a Database) -> Self {
        TodoService { db }
    }

    pub async fn create(&self, title: &str, content: &str, tags: &[i64]) -> AppResult<i64> {
        let tag_ids = distinct_ids(tags);
        let mut tx = self.db.pool.begin().await?;

        // Fail fast on dangling tag references before any write.
        consistency::require_tags_exist(&mut *tx, &tag_ids).await?;

        let todo_id = repo::todo::insert(&mut *tx, title, content).await?;
        if !tag_ids.is_empty() {
            repo::todo_tag::insert_links(&mut *tx, todo_id, &tag_ids).await?;
        }

        tx.commit().await?;
        Ok(todo_id)
    }

    pub async fn get_by_id(&self, todo_id: i64) -> AppResult<Todo> {
        let row = repo::todo::select_by_id(self.db.pool(), todo_id).await?;
        let mut todo = consistency::require_found(row, "todo")?;
        todo.tags = repo::tag::select_by_todo_id(self.db.pool(), todo_id).await?;
        Ok(todo)
    }

    pub async fn list(&self, filter: &TodoListQuery) -> AppResult<Vec<Todo>> {
        let mut todos = repo::todo::select_all(self.db.pool(), filter).await?;
        for todo in &mut todos {
            todo.tags = repo::tag::select_by_todo_id(self.db.pool(), todo.todo_id).await?;
        }
        Ok(todos)
    }

    pub async fn update(
        &self,
        todo_id: i64,
        title: &str,
        content: &str,
        tags: &[i64],
        version: i64,
    ) -> AppResult<()> {
        let tag_ids = distinct_ids(tags);
        let mut tx = self.db.pool.begin().await?;

        // Existence precedes the tag check precedes the write, so the caller
        // always gets the most specific applicable error.
        let row = repo::todo::select_by_id(&mut *tx, todo_id).await?;
        consistency::require_found(row, "todo")?;
        consistency::require_tags_exist(&mut *tx, &tag_ids).await?;

        let rows = repo::todo::update(&mut *tx, todo_id, title, content, version).await?;
        consistency::require_affected(rows)?;

        // Full junction replacement after the version check: an empty incoming
        // set clears the existing links.
        repo::todo_tag::delete_by_todo_id(&mut *tx, todo_id).await?;
        if !tag_ids.is_empty() {
            repo::todo_tag::insert_links(&mut *tx, todo_id, &tag_ids).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, todo_id: i64, version: i64) -> AppResult<()> {
        let mut tx = self.db.pool.begin().await?;

        let row = repo::todo::select_by_id(&mut *tx, todo_id).await?;
        consistency::require_found(row, "todo")?;

        let rows = repo::todo::delete(&mut *tx, todo_id, version).await?;
        consistency::require_affected(rows)?;

        // The todo row is gone; junction cleanup is unconditional.
        repo::todo_tag::delete_by_todo_id(&mut *tx, todo_id).await?;

        tx.commit().await?;
        Ok(())
    }
}
