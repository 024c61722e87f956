//! Rating aggregator
//!
//! 课程评分是派生值：非空评价集合的算术平均。空集合保持上一次计算值
//! （或创建默认值 5.0），不重置。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::repository::ReviewRepository;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// Course rating aggregator
///
/// The review repository splices the same recompute block into each review
/// mutation transaction; this standalone entry point exists for explicit
/// recomputation (e.g. consistency repair).
#[derive(Clone)]
pub struct RatingAggregator {
    reviews: ReviewRepository,
}

impl RatingAggregator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reviews: ReviewRepository::new(db),
        }
    }

    /// Recompute one course's rating from its current review set
    ///
    /// Returns the stored rating after the recompute.
    pub async fn recompute(&self, course_id: &str) -> AppResult<f64> {
        let course_rid: RecordId = course_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid ID: {}", course_id)))?;

        let course = self
            .reviews
            .recompute_course_rating(course_rid, now_millis())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {} not found", course_id)))?;

        tracing::info!(course = %course_id, rating = course.rating, "course rating recomputed");
        Ok(course.rating)
    }
}
