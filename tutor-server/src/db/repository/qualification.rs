//! Qualification Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Qualification, QualificationCreate, QualificationStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct QualificationRepository {
    base: BaseRepository,
}

impl QualificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find qualification by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Qualification>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let qualification: Option<Qualification> = self.base.db().select(thing).await?;
        Ok(qualification)
    }

    /// Submit a new document; every submission starts out pending
    pub async fn create(
        &self,
        user: RecordId,
        data: QualificationCreate,
        now: i64,
    ) -> RepoResult<Qualification> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE qualification SET
                    user = $user,
                    name = $name,
                    type = $type,
                    issuer = $issuer,
                    description = $description,
                    file_url = $file_url,
                    status = 'pending',
                    upload_time = $now,
                    update_time = $now
                RETURN AFTER"#,
            )
            .bind(("user", user))
            .bind(("name", data.name))
            .bind(("type", data.kind))
            .bind(("issuer", data.issuer))
            .bind(("description", data.description))
            .bind(("file_url", data.file_url))
            .bind(("now", now))
            .await?;

        let created: Option<Qualification> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create qualification".to_string()))
    }

    /// A user's documents, newest upload first, optionally filtered by status
    pub async fn find_by_user(
        &self,
        user: RecordId,
        status: Option<QualificationStatus>,
    ) -> RepoResult<Vec<Qualification>> {
        let sql = if status.is_some() {
            "SELECT * FROM qualification WHERE user = $user AND status = $status \
             ORDER BY upload_time DESC"
        } else {
            "SELECT * FROM qualification WHERE user = $user ORDER BY upload_time DESC"
        };
        let mut query = self.base.db().query(sql).bind(("user", user));
        if let Some(s) = status {
            query = query.bind(("status", s));
        }
        let mut result = query.await?;
        Ok(result.take(0)?)
    }

    /// All documents awaiting review
    pub async fn find_pending(&self) -> RepoResult<Vec<Qualification>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM qualification WHERE status = 'pending' ORDER BY upload_time DESC",
            )
            .await?;
        Ok(result.take(0)?)
    }

    /// All documents that have been reviewed at least once
    pub async fn find_reviewed(&self) -> RepoResult<Vec<Qualification>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM qualification WHERE status != 'pending' ORDER BY update_time DESC",
            )
            .await?;
        Ok(result.take(0)?)
    }

    /// Apply a review decision; a re-review simply overwrites the previous
    /// status/comment/date
    pub async fn apply_review(
        &self,
        qualification: RecordId,
        status: QualificationStatus,
        comment: Option<String>,
        now: i64,
    ) -> RepoResult<Option<Qualification>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $qualification SET status = $status, review_comment = $comment, \
                 review_date = $now, update_time = $now RETURN AFTER",
            )
            .bind(("qualification", qualification))
            .bind(("status", status))
            .bind(("comment", comment))
            .bind(("now", now))
            .await?;
        Ok(result.take::<Option<Qualification>>(0)?)
    }

    /// Hard delete a document
    pub async fn delete(&self, qualification: RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("DELETE $qualification")
            .bind(("qualification", qualification))
            .await?
            .check()?;
        Ok(())
    }
}
