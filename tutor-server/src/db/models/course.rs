//! Course Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// 新建课程的默认评分，首条评价提交后由聚合器覆盖
pub const DEFAULT_RATING: f64 = 5.0;

/// Course approval status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Pending,
    Approved,
    Rejected,
}

/// Course entity
///
/// `rating` is derived state: the arithmetic mean of the course's reviews,
/// written only by the rating aggregator inside the same transaction as the
/// review change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub teacher: RecordId,
    pub title: String,
    pub category: String,
    /// 课时数
    pub duration: i32,
    pub price: f64,
    pub description: String,
    pub cover: String,
    pub status: CourseStatus,
    pub rating: f64,
    pub student_count: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for creating a course
#[derive(Debug, Clone, Deserialize)]
pub struct CourseCreate {
    pub title: String,
    pub category: String,
    pub duration: i32,
    pub price: f64,
    pub description: String,
    pub cover: String,
}
