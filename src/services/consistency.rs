//! Checks shared by the resource services: entity existence, tag referential
//! integrity, and affected-row verification after conditional writes. Each
//! check raises a typed error that the services propagate unmodified.

use std::collections::BTreeSet;

use sqlx::SqliteExecutor;

use crate::error::{AppError, AppResult};
use crate::repo;

/// Existence check. Returns the found entity so the update path does not need
/// a second lookup.
pub fn require_found<T>(row: Option<T>, what: &str) -> AppResult<T> {
    row.ok_or_else(|| AppError::NotFound(format!("{what} does not exist")))
}

/// Referential-integrity check for tag references. No-op on the empty set;
/// otherwise a single batch query over the distinct ids, so existence is
/// observed at one instant rather than per id.
pub async fn require_tags_exist(
    executor: impl SqliteExecutor<'_>,
    tag_ids: &[i64],
) -> AppResult<()> {
    let distinct: Vec<i64> = tag_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if distinct.is_empty() {
        return Ok(());
    }

    let found = repo::tag::count_by_ids(executor, &distinct).await?;
    if (found as usize) < distinct.len() {
        return Err(AppError::NotFound(
            "one or more referenced tags do not exist".to_string(),
        ));
    }

    Ok(())
}

/// Optimistic-lock verification: a conditional update or delete that matched
/// zero rows means the caller's observed version is stale or the row vanished.
/// The two cases are indistinguishable here and both surface as Conflict.
pub fn require_affected(rows: u64) -> AppResult<()> {
    if rows == 0 {
        return Err(AppError::Conflict(
            "no rows matched the id and expected version".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    #[test]
    fn test_require_found() {
        assert_eq!(require_found(Some(7), "tag").unwrap(), 7);
        assert!(matches!(
            require_found::<i64>(None, "tag"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_require_affected() {
        assert!(require_affected(1).is_ok());
        assert!(require_affected(3).is_ok());
        assert!(matches!(require_affected(0), Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_require_tags_exist_empty_set_is_noop() {
        let db = test_db().await;
        require_tags_exist(db.pool(), &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_require_tags_exist_missing_id() {
        let db = test_db().await;
        let id = repo::tag::insert(db.pool(), "work").await.unwrap();

        require_tags_exist(db.pool(), &[id]).await.unwrap();

        let err = require_tags_exist(db.pool(), &[id, id + 1])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_require_tags_exist_dedupes_requested_ids() {
        let db = test_db().await;
        let id = repo::tag::insert(db.pool(), "work").await.unwrap();

        // One existing row satisfies a request that repeats the same id.
        require_tags_exist(db.pool(), &[id, id, id]).await.unwrap();
    }
}
