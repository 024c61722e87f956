//! Qualification moderation engine
//!
//! 状态机：`pending → approved | rejected`。复审覆盖上一次结论；
//! `rejected` 没有回到 `pending` 的路径，重新提交需要新建记录。
//! 审核本身不做管理员校验——访问控制层在调用前已经完成。

use std::collections::HashMap;

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{
    Qualification, QualificationCreate, QualificationReview, QualificationStatus,
};
use crate::db::repository::{QualificationRepository, UserRepository};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn parse_id(id: &str) -> AppResult<RecordId> {
    id.parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {}", id)))
}

/// Per-item result of a batch review: the reviewed document, or the error
/// that stopped this one entry
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchReviewOutcome {
    Reviewed(Qualification),
    Error { code: String, error: String },
}

impl BatchReviewOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, BatchReviewOutcome::Error { .. })
    }
}

/// Qualification moderation engine
#[derive(Clone)]
pub struct QualificationModeration {
    qualifications: QualificationRepository,
    users: UserRepository,
}

impl QualificationModeration {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            qualifications: QualificationRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Submit a document for review; every submission starts out pending
    pub async fn submit(
        &self,
        user_id: &str,
        data: QualificationCreate,
    ) -> AppResult<Qualification> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.issuer, "issuer", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_optional_text(&data.file_url, "file_url", MAX_URL_LEN)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", user_id)))?;

        let qualification = self
            .qualifications
            .create(parse_id(user_id)?, data, now_millis())
            .await?;

        tracing::info!(user = %user_id, name = %qualification.name, "qualification submitted");
        Ok(qualification)
    }

    /// Apply one review decision
    ///
    /// Unconditionally authoritative once invoked; a re-review overwrites
    /// the previous status/comment/date.
    pub async fn review(
        &self,
        qualification_id: &str,
        decision: QualificationReview,
    ) -> AppResult<Qualification> {
        validate_optional_text(&decision.comment, "comment", MAX_NOTE_LEN)?;

        let status: QualificationStatus = decision.verdict.into();
        let reviewed = self
            .qualifications
            .apply_review(
                parse_id(qualification_id)?,
                status,
                decision.comment,
                now_millis(),
            )
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Qualification {} not found", qualification_id))
            })?;

        tracing::info!(
            qualification = %qualification_id,
            status = status.as_str(),
            "qualification reviewed"
        );
        Ok(reviewed)
    }

    /// Apply a batch of review decisions, one independent transaction per
    /// entry
    ///
    /// A failure on one entry is captured under its id and never rolls back
    /// or aborts the sibling entries.
    pub async fn batch_review(
        &self,
        decisions: HashMap<String, QualificationReview>,
    ) -> HashMap<String, BatchReviewOutcome> {
        let mut results = HashMap::with_capacity(decisions.len());
        for (qualification_id, decision) in decisions {
            let outcome = match self.review(&qualification_id, decision).await {
                Ok(reviewed) => BatchReviewOutcome::Reviewed(reviewed),
                Err(e) => BatchReviewOutcome::Error {
                    code: e.code().to_string(),
                    error: e.to_string(),
                },
            };
            results.insert(qualification_id, outcome);
        }
        results
    }

    /// Delete an own document; approved documents are immutable to their
    /// owner
    pub async fn delete(&self, user_id: &str, qualification_id: &str) -> AppResult<()> {
        let qualification = self
            .qualifications
            .find_by_id(qualification_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Qualification {} not found", qualification_id))
            })?;

        if qualification.user != parse_id(user_id)? {
            return Err(AppError::forbidden(
                "You don't have permission to delete this qualification",
            ));
        }
        if qualification.status == QualificationStatus::Approved {
            return Err(AppError::invalid_state(
                "An approved qualification cannot be deleted",
            ));
        }

        self.qualifications
            .delete(parse_id(qualification_id)?)
            .await?;

        tracing::info!(qualification = %qualification_id, user = %user_id, "qualification deleted");
        Ok(())
    }

    /// A user's documents, optionally filtered by status
    pub async fn user_qualifications(
        &self,
        user_id: &str,
        status: Option<QualificationStatus>,
    ) -> AppResult<Vec<Qualification>> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", user_id)))?;
        Ok(self
            .qualifications
            .find_by_user(parse_id(user_id)?, status)
            .await?)
    }

    /// All documents awaiting review
    pub async fn pending(&self) -> AppResult<Vec<Qualification>> {
        Ok(self.qualifications.find_pending().await?)
    }

    /// All documents that have been reviewed at least once
    pub async fn reviewed(&self) -> AppResult<Vec<Qualification>> {
        Ok(self.qualifications.find_reviewed().await?)
    }
}
