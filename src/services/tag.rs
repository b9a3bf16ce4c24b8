use crate::db::Database;
use crate::error::AppResult;
use crate::models::tag::{Tag, TagListQuery};
use crate::repo;
use crate::services::consistency;

pub struct TagService<'a> {
    db: &'a Database,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a Database) -> Self {
        TagService { db }
    }

    pub async fn create(&self, name: &str) -> AppResult<i64> {
        let tag_id = repo::tag::insert(self.db.pool(), name).await?;
        Ok(tag_id)
    }

    pub async fn get_by_id(&self, tag_id: i64) -> AppResult<Tag> {
        let row = repo::tag::select_by_id(self.db.pool(), tag_id).await?;
        consistency::require_found(row, "tag")
    }

    pub async fn list(&self, filter: &TagListQuery) -> AppResult<Vec<Tag>> {
        let tags = repo::tag::select_all(self.db.pool(), filter).await?;
        Ok(tags)
    }

    pub async fn update(&self, tag_id: i64, name: &str, version: i64) -> AppResult<()> {
        let mut tx = self.db.pool.begin().await?;

        let row = repo::tag::select_by_id(&mut *tx, tag_id).await?;
        consistency::require_found(row, "tag")?;

        let rows = repo::tag::update(&mut *tx, tag_id, name, version).await?;
        consistency::require_affected(rows)?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, tag_id: i64, version: i64) -> AppResult<()> {
        let mut tx = self.db.pool.begin().await?;

        let row = repo::tag::select_by_id(&mut *tx, tag_id).await?;
        consistency::require_found(row, "tag")?;

        let rows = repo::tag::delete(&mut *tx, tag_id, version).await?;
        consistency::require_affected(rows)?;

        // The tag row is gone; junction cleanup is unconditional.
        repo::todo_tag::delete_by_tag_id(&mut *tx, tag_id).await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    async fn test_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let tag_id = service.create("work").await.unwrap();
        let tag = service.get_by_id(tag_id).await.unwrap();

        assert_eq!(tag.tag_id, tag_id);
        assert_eq!(tag.name, "work");
        assert_eq!(tag.version, 0);
    }

    #[tokio::test]
    async fn test_get_missing_id_is_not_found() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let err = service.get_by_id(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_increments_version() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let tag_id = service.create("work").await.unwrap();
        service.update(tag_id, "home", 0).await.unwrap();

        let tag = service.get_by_id(tag_id).await.unwrap();
        assert_eq!(tag.name, "home");
        assert_eq!(tag.version, 1);
    }

    #[tokio::test]
    async fn test_update_with_stale_version_is_conflict() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let tag_id = service.create("work").await.unwrap();
        service.update(tag_id, "home", 0).await.unwrap();

        let err = service.update(tag_id, "garden", 0).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // The stored row is unchanged by the failed attempt.
        let tag = service.get_by_id(tag_id).await.unwrap();
        assert_eq!(tag.name, "home");
        assert_eq!(tag.version, 1);
    }

    #[tokio::test]
    async fn test_failed_update_is_repeatable() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let tag_id = service.create("work").await.unwrap();
        service.update(tag_id, "home", 0).await.unwrap();

        for _ in 0..3 {
            let err = service.update(tag_id, "garden", 0).await.unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)));
        }

        let tag = service.get_by_id(tag_id).await.unwrap();
        assert_eq!(tag.version, 1);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let err = service.update(999, "home", 0).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_with_stale_version_is_conflict() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let tag_id = service.create("work").await.unwrap();
        service.update(tag_id, "home", 0).await.unwrap();

        let err = service.delete(tag_id, 0).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Still present after the failed delete.
        assert!(service.get_by_id(tag_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let tag_id = service.create("work").await.unwrap();
        service.delete(tag_id, 0).await.unwrap();

        let err = service.get_by_id(tag_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let db = test_db().await;
        let service = TagService::new(&db);

        let err = service.delete(999, 0).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_with_name_filter() {
        let db = test_db().await;
        let service = TagService::new(&db);

        service.create("work").await.unwrap();
        service.create("workout").await.unwrap();
        service.create("home").await.unwrap();

        let all = service.list(&TagListQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = TagListQuery {
            name: Some("work".to_string()),
        };
        let filtered = service.list(&filter).await.unwrap();
        assert_eq!(filtered.len(), 2);

        let filter = TagListQuery {
            name: Some("garden".to_string()),
        };
        let empty = service.list(&filter).await.unwrap();
        assert!(empty.is_empty());
    }
}
