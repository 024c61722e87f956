//! Review Model
//!
//! 一个订单至多一条评价 (`uniq_review_order` 唯一索引兜底)，
//! 且只有 `completed` 订单可以评价。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// 所属订单 (唯一)
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub course: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub student: RecordId,
    pub rating: i32,
    pub content: String,
    pub created_at: i64,
}

/// Payload for creating a review
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub order_id: String,
    pub rating: i32,
    pub content: String,
}

/// Payload for updating a review
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewUpdate {
    pub rating: i32,
    pub content: String,
}
