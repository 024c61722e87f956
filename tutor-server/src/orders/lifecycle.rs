//! Order lifecycle engine
//!
//! 每个操作先做授权判定（显式的 (actor, entity) 谓词），再做状态校验，
//! 最后以条件更新提交——提交点再次核对状态，并发输家得到 `InvalidState`。

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{Order, OrderCreate, OrderDetail, OrderStatus};
use crate::db::repository::{CourseRepository, OrderRepository, UserRepository};
use crate::utils::time::now_millis;
use crate::utils::types::{Page, PaginationParams};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

fn parse_id(id: &str) -> AppResult<RecordId> {
    id.parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {}", id)))
}

/// Order lifecycle engine
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    courses: CourseRepository,
    users: UserRepository,
}

impl OrderLifecycle {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            courses: CourseRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Book a course
    ///
    /// Fails with `Conflict` if the student already holds a non-cancelled
    /// order for the course. The amount is a snapshot of the course price.
    pub async fn create(&self, student_id: &str, data: OrderCreate) -> AppResult<Order> {
        validate_optional_text(&data.remark, "remark", MAX_NOTE_LEN)?;
        if data.booking_time <= 0 {
            return Err(AppError::validation("booking_time must be a positive timestamp"));
        }

        self.users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", student_id)))?;
        let course = self
            .courses
            .find_by_id(&data.course_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {} not found", data.course_id)))?;

        let order = self
            .orders
            .create_exclusive(
                parse_id(student_id)?,
                parse_id(&data.course_id)?,
                course.price,
                data.booking_time,
                data.remark,
                now_millis(),
            )
            .await?;

        tracing::info!(
            student = %student_id,
            course = %data.course_id,
            amount = order.amount,
            "order created"
        );
        Ok(order)
    }

    /// Read one order, visible only to its student or the course's teacher
    pub async fn get(&self, order_id: &str, actor_id: &str) -> AppResult<OrderDetail> {
        let detail = self
            .orders
            .get_detail(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;

        let actor = parse_id(actor_id)?;
        if parse_id(&detail.student_id)? != actor && parse_id(&detail.teacher_id)? != actor {
            return Err(AppError::forbidden(
                "You don't have permission to view this order",
            ));
        }
        Ok(detail)
    }

    /// pending → paid, by the order's student
    pub async fn pay(&self, order_id: &str, actor_id: &str) -> AppResult<Order> {
        let order = self.load(order_id).await?;

        if order.student != parse_id(actor_id)? {
            return Err(AppError::forbidden(
                "You don't have permission to pay this order",
            ));
        }
        if order.status != OrderStatus::Pending {
            return Err(AppError::invalid_state("Order is not in pending status"));
        }

        let updated = self
            .orders
            .mark_paid(parse_id(order_id)?, now_millis())
            .await?
            // Lost a concurrent transition between the check and the commit
            .ok_or_else(|| AppError::invalid_state("Order is not in pending status"))?;

        tracing::info!(order = %order_id, student = %actor_id, "order paid");
        Ok(updated)
    }

    /// pending|paid → cancelled
    ///
    /// A student may cancel their own pending order; the course's teacher
    /// may cancel a paid one. Everything else is a hard failure.
    pub async fn cancel(
        &self,
        order_id: &str,
        actor_id: &str,
        reason: Option<String>,
    ) -> AppResult<Order> {
        validate_optional_text(&reason, "cancellation reason", MAX_NOTE_LEN)?;

        let order = self.load(order_id).await?;
        let course = self
            .courses
            .find_by_id(&order.course.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {} not found", order.course)))?;

        let actor = parse_id(actor_id)?;
        let expected = if order.student == actor {
            if order.status != OrderStatus::Pending {
                return Err(AppError::invalid_state("Student can only cancel pending orders"));
            }
            OrderStatus::Pending
        } else if course.teacher == actor {
            if order.status != OrderStatus::Paid {
                return Err(AppError::invalid_state("Teacher can only cancel paid orders"));
            }
            OrderStatus::Paid
        } else {
            return Err(AppError::forbidden(
                "You don't have permission to cancel this order",
            ));
        };

        let updated = self
            .orders
            .mark_cancelled(parse_id(order_id)?, expected, reason, now_millis())
            .await?
            .ok_or_else(|| {
                AppError::invalid_state(format!(
                    "Order is no longer in {} status",
                    expected.as_str()
                ))
            })?;

        tracing::info!(order = %order_id, actor = %actor_id, "order cancelled");
        Ok(updated)
    }

    /// paid → completed, by the course's teacher
    pub async fn complete(&self, order_id: &str, actor_id: &str) -> AppResult<Order> {
        let order = self.load(order_id).await?;
        let course = self
            .courses
            .find_by_id(&order.course.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Course {} not found", order.course)))?;

        if course.teacher != parse_id(actor_id)? {
            return Err(AppError::forbidden(
                "You don't have permission to complete this order",
            ));
        }
        if order.status != OrderStatus::Paid {
            return Err(AppError::invalid_state("Order is not in paid status"));
        }

        let updated = self
            .orders
            .mark_completed(parse_id(order_id)?, now_millis())
            .await?
            .ok_or_else(|| AppError::invalid_state("Order is not in paid status"))?;

        tracing::info!(order = %order_id, teacher = %actor_id, "order completed");
        Ok(updated)
    }

    /// Orders placed by a student, newest first
    pub async fn student_orders(
        &self,
        student_id: &str,
        status: Option<OrderStatus>,
        keyword: Option<String>,
        params: &PaginationParams,
    ) -> AppResult<Page<OrderDetail>> {
        self.users
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", student_id)))?;
        Ok(self
            .orders
            .page_by_student(parse_id(student_id)?, status, keyword, params)
            .await?)
    }

    /// Orders on a teacher's courses, newest first
    pub async fn teacher_orders(
        &self,
        teacher_id: &str,
        status: Option<OrderStatus>,
        keyword: Option<String>,
        params: &PaginationParams,
    ) -> AppResult<Page<OrderDetail>> {
        self.users
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", teacher_id)))?;
        Ok(self
            .orders
            .page_by_teacher(parse_id(teacher_id)?, status, keyword, params)
            .await?)
    }

    async fn load(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))
    }
}
