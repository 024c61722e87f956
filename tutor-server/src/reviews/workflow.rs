//! Review workflow engine
//!
//! 评价的创建门禁：订单属于操作者、状态恰好是 `completed`、尚未评价过。
//! 修改/删除只看所有权。三条路径都在事务内联动评分重算。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{Review, ReviewCreate, ReviewUpdate, OrderStatus};
use crate::db::repository::{CourseRepository, OrderRepository, ReviewRepository, UserRepository};
use crate::utils::time::now_millis;
use crate::utils::types::{Page, PaginationParams};
use crate::utils::validation::{MAX_NOTE_LEN, validate_rating, validate_required_text};
use crate::utils::{AppError, AppResult};

fn parse_id(id: &str) -> AppResult<RecordId> {
    id.parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {}", id)))
}

/// Review workflow engine
#[derive(Clone)]
pub struct ReviewWorkflow {
    reviews: ReviewRepository,
    orders: OrderRepository,
    courses: CourseRepository,
    users: UserRepository,
}

impl ReviewWorkflow {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reviews: ReviewRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            courses: CourseRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Review a completed order
    pub async fn create(&self, student_id: &str, data: ReviewCreate) -> AppResult<Review> {
        validate_rating(data.rating)?;
        validate_required_text(&data.content, "content", MAX_NOTE_LEN)?;

        let order = self
            .orders
            .find_by_id(&data.order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", data.order_id)))?;

        let actor = parse_id(student_id)?;
        if order.student != actor {
            return Err(AppError::forbidden(
                "You don't have permission to review this order",
            ));
        }
        if order.status != OrderStatus::Completed {
            return Err(AppError::invalid_state("You can only review completed orders"));
        }

        let review = self
            .reviews
            .create_with_recompute(
                parse_id(&data.order_id)?,
                order.course,
                actor,
                data.rating,
                data.content,
                now_millis(),
            )
            .await?;

        tracing::info!(
            order = %data.order_id,
            student = %student_id,
            rating = data.rating,
            "review created"
        );
        Ok(review)
    }

    /// Update an own review; the course rating is recomputed in the same
    /// transaction
    pub async fn update(
        &self,
        review_id: &str,
        student_id: &str,
        data: ReviewUpdate,
    ) -> AppResult<Review> {
        validate_rating(data.rating)?;
        validate_required_text(&data.content, "content", MAX_NOTE_LEN)?;

        let review = self.load(review_id).await?;
        if review.student != parse_id(student_id)? {
            return Err(AppError::forbidden(
                "You don't have permission to update this review",
            ));
        }

        let updated = self
            .reviews
            .update_with_recompute(
                parse_id(review_id)?,
                review.course,
                data.rating,
                data.content,
                now_millis(),
            )
            .await?
            .ok_or_else(|| AppError::not_found(format!("Review {} not found", review_id)))?;

        tracing::info!(review = %review_id, student = %student_id, "review updated");
        Ok(updated)
    }

    /// Delete an own review; the course rating is recomputed in the same
    /// transaction
    pub async fn delete(&self, review_id: &str, student_id: &str) -> AppResult<()> {
        let review = self.load(review_id).await?;
        if review.student != parse_id(student_id)? {
            return Err(AppError::forbidden(
                "You don't have permission to delete this review",
            ));
        }

        self.reviews
            .delete_with_recompute(parse_id(review_id)?, review.course, now_millis())
            .await?;

        tracing::info!(review = %review_id, student = %student_id, "review deleted");
        Ok(())
    }

    /// Read one review
    pub async fn get(&self, review_id: &str) -> AppResult<Review> {
        self.load(review_id).await
    }

    /// The review attached to an order
    pub async fn order_review(&self, order_id: &str) -> AppResult<Review> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        self.reviews
            .find_by_order(parse_id(order_id)?)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Review not found for order {}", order_id)))
    }

    /// Whether an order has been reviewed
    pub async fn has_review(&self, order_id: &str) -> AppResult<bool> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
        Ok(self.reviews.exists_by_order(parse_id(order_id)?).await?)
    }

    /// Reviews for a course, newest first
    pub async fn course_reviews(
        &self,
        course_id: &str,
        params: &PaginationParams,
    ) -> AppResult<Page<Review>> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {} not found", course_id)))?;
        Ok(self
            .reviews
            .page_by_course(parse_id(course_id)?, params)
            .await?)
    }

    /// Reviews written by a student, newest first
    pub async fn student_reviews(
        &self,
        student_id: &str,
        params: &PaginationParams,
    ) -> AppResult<Page<Review>> {
        self.users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", student_id)))?;
        Ok(self
            .reviews
            .page_by_student(parse_id(student_id)?, params)
            .await?)
    }

    async fn load(&self, review_id: &str) -> AppResult<Review> {
        self.reviews
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Review {} not found", review_id)))
    }
}
