//! Order Model
//!
//! 订单状态机：
//!
//! ```text
//! pending ──pay──▶ paid ──complete──▶ completed
//!    │               │
//!    │ cancel        │ cancel
//!    │ (student)     │ (teacher)
//!    ▼               ▼
//! cancelled       cancelled
//! ```
//!
//! `completed` 和 `cancelled` 是终态；订单永不硬删除。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Order entity
///
/// `amount` is a snapshot of the course price at booking time and is never
/// re-read from the course afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub course: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub student: RecordId,
    pub amount: f64,
    pub status: OrderStatus,
    /// 预约时间 (Unix millis)
    pub booking_time: i64,
    pub payment_time: Option<i64>,
    pub completion_time: Option<i64>,
    pub cancellation_time: Option<i64>,
    pub cancellation_reason: Option<String>,
    pub remark: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payload for booking a course
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub course_id: String,
    pub booking_time: i64,
    pub remark: Option<String>,
}

/// Review fields embedded in an order detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReview {
    pub review_id: String,
    pub rating: i32,
    pub content: String,
    pub created_at: i64,
}

/// Order detail projection: order fields plus the linked course/teacher
/// display fields and the review, if one exists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_id: String,
    pub course_id: String,
    pub course_title: String,
    pub course_cover: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub student_id: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub booking_time: i64,
    pub payment_time: Option<i64>,
    pub completion_time: Option<i64>,
    pub cancellation_time: Option<i64>,
    pub cancellation_reason: Option<String>,
    pub remark: Option<String>,
    pub review: Option<OrderReview>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl OrderDetail {
    pub fn has_review(&self) -> bool {
        self.review.is_some()
    }
}
