//! Review Repository
//!
//! 评价的增删改永远和课程评分重算在同一个事务里提交，
//! 课程评分不会滞后于任何已提交的评价集合变更。

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Course, Review};
use crate::utils::types::{Page, PaginationParams};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// THROW marker inside the create transaction
const DUPLICATE_REVIEW: &str = "duplicate_review";

fn classify_create_error(e: surrealdb::Error) -> RepoError {
    if e.to_string().contains(DUPLICATE_REVIEW) {
        RepoError::Duplicate("This order has already been reviewed".to_string())
    } else {
        RepoError::Database(e.to_string())
    }
}

/// Rating recompute block, spliced into every review mutation transaction.
///
/// Binds: `$course`, `$now`. An empty review set leaves the stored rating
/// untouched (the last computed value, or the creation default).
pub(crate) const RECOMPUTE_RATING: &str = "\
    LET $ratings = (SELECT VALUE rating FROM review WHERE course = $course); \
    UPDATE $course SET \
        rating = IF array::len($ratings) > 0 THEN math::mean($ratings) ELSE rating END, \
        updated_at = $now;";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find review by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Review>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let review: Option<Review> = self.base.db().select(thing).await?;
        Ok(review)
    }

    /// Find the review attached to an order
    pub async fn find_by_order(&self, order: RecordId) -> RepoResult<Option<Review>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM review WHERE order_id = $order LIMIT 1")
            .bind(("order", order))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews.into_iter().next())
    }

    /// Whether an order already has a review
    pub async fn exists_by_order(&self, order: RecordId) -> RepoResult<bool> {
        Ok(self.find_by_order(order).await?.is_some())
    }

    /// Create a review and recompute the course rating in one transaction
    pub async fn create_with_recompute(
        &self,
        order: RecordId,
        course: RecordId,
        student: RecordId,
        rating: i32,
        content: String,
        now: i64,
    ) -> RepoResult<Review> {
        self.base
            .db()
            .query(format!(
                r#"BEGIN TRANSACTION;
                LET $dup = (SELECT VALUE id FROM review WHERE order_id = $order);
                IF array::len($dup) > 0 {{ THROW "{DUPLICATE_REVIEW}" }};
                CREATE review SET
                    order_id = $order,
                    course = $course,
                    student = $student,
                    rating = $rating,
                    content = $content,
                    created_at = $now;
                {RECOMPUTE_RATING}
                COMMIT TRANSACTION;"#
            ))
            .bind(("order", order.clone()))
            .bind(("course", course))
            .bind(("student", student))
            .bind(("rating", rating))
            .bind(("content", content))
            .bind(("now", now))
            .await
            .map_err(classify_create_error)?
            .check()
            .map_err(classify_create_error)?;

        // The committed review is unique per order
        self.find_by_order(order)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Update a review and recompute the course rating in one transaction
    pub async fn update_with_recompute(
        &self,
        review: RecordId,
        course: RecordId,
        rating: i32,
        content: String,
        now: i64,
    ) -> RepoResult<Option<Review>> {
        self.base
            .db()
            .query(format!(
                r#"BEGIN TRANSACTION;
                UPDATE $review SET rating = $rating, content = $content;
                {RECOMPUTE_RATING}
                COMMIT TRANSACTION;"#
            ))
            .bind(("review", review.clone()))
            .bind(("course", course))
            .bind(("rating", rating))
            .bind(("content", content))
            .bind(("now", now))
            .await?
            .check()?;

        let updated: Option<Review> = self.base.db().select(review).await?;
        Ok(updated)
    }

    /// Delete a review and recompute the course rating in one transaction
    pub async fn delete_with_recompute(
        &self,
        review: RecordId,
        course: RecordId,
        now: i64,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(format!(
                r#"BEGIN TRANSACTION;
                DELETE $review;
                {RECOMPUTE_RATING}
                COMMIT TRANSACTION;"#
            ))
            .bind(("review", review))
            .bind(("course", course))
            .bind(("now", now))
            .await?
            .check()?;
        Ok(())
    }

    /// Recompute a course's rating from its current review set
    ///
    /// Standalone entry point for the aggregator; the review mutation paths
    /// splice the same block into their own transactions.
    pub async fn recompute_course_rating(
        &self,
        course: RecordId,
        now: i64,
    ) -> RepoResult<Option<Course>> {
        self.base
            .db()
            .query(format!(
                r#"BEGIN TRANSACTION;
                {RECOMPUTE_RATING}
                COMMIT TRANSACTION;"#
            ))
            .bind(("course", course.clone()))
            .bind(("now", now))
            .await?
            .check()?;

        let updated: Option<Course> = self.base.db().select(course).await?;
        Ok(updated)
    }

    /// Reviews for a course, newest first
    pub async fn page_by_course(
        &self,
        course: RecordId,
        params: &PaginationParams,
    ) -> RepoResult<Page<Review>> {
        self.page_by("course = $owner", course, params).await
    }

    /// Reviews written by a student, newest first
    pub async fn page_by_student(
        &self,
        student: RecordId,
        params: &PaginationParams,
    ) -> RepoResult<Page<Review>> {
        self.page_by("student = $owner", student, params).await
    }

    async fn page_by(
        &self,
        owner_clause: &str,
        owner: RecordId,
        params: &PaginationParams,
    ) -> RepoResult<Page<Review>> {
        let sql = format!(
            "SELECT * FROM review WHERE {owner_clause} \
             ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_sql =
            format!("SELECT count() AS count FROM review WHERE {owner_clause} GROUP ALL");

        let mut result = self
            .base
            .db()
            .query(sql)
            .query(count_sql)
            .bind(("owner", owner))
            .bind(("limit", params.limit() as i64))
            .bind(("start", params.offset() as i64))
            .await?;

        let items: Vec<Review> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.into_iter().next().map(|r| r.count).unwrap_or(0);

        Ok(Page::new(items, total, params))
    }
}
