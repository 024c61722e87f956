//! Qualification Model
//!
//! 资质审核状态机：`pending → approved | rejected`。
//! `rejected` 不能回到 `pending`，重新提交只能新建记录；
//! 复审直接覆盖 status/comment/date。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Qualification document type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QualificationType {
    Education,
    Teaching,
    Professional,
    Language,
    Other,
}

/// Qualification review status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QualificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl QualificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationStatus::Pending => "pending",
            QualificationStatus::Approved => "approved",
            QualificationStatus::Rejected => "rejected",
        }
    }
}

/// Qualification entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qualification {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    /// 证书名称
    pub name: String,
    #[serde(rename = "type")]
    pub kind: QualificationType,
    /// 发证机构
    pub issuer: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub status: QualificationStatus,
    pub review_comment: Option<String>,
    pub review_date: Option<i64>,
    pub upload_time: i64,
    pub update_time: i64,
}

/// Payload for submitting a qualification
#[derive(Debug, Clone, Deserialize)]
pub struct QualificationCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: QualificationType,
    pub issuer: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
}

/// Moderation verdict: the only two states an admin review may set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVerdict {
    Approved,
    Rejected,
}

impl From<ReviewVerdict> for QualificationStatus {
    fn from(verdict: ReviewVerdict) -> Self {
        match verdict {
            ReviewVerdict::Approved => QualificationStatus::Approved,
            ReviewVerdict::Rejected => QualificationStatus::Rejected,
        }
    }
}

/// Payload for an admin review decision
#[derive(Debug, Clone, Deserialize)]
pub struct QualificationReview {
    pub verdict: ReviewVerdict,
    pub comment: Option<String>,
}
