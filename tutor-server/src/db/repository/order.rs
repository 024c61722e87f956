//! Order Repository
//!
//! 订单的每个状态转换都是一条「条件更新」：`WHERE status = $expected`
//! 在提交点重新校验状态，并发竞争的输家拿到空结果集。
//! 「至多一个未取消订单」在创建事务内用 THROW 强制。

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Order, OrderDetail, OrderStatus};
use crate::utils::types::{Page, PaginationParams};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// THROW marker inside the booking transaction
const DUPLICATE_ORDER: &str = "duplicate_active_order";

fn classify_booking_error(e: surrealdb::Error) -> RepoError {
    if e.to_string().contains(DUPLICATE_ORDER) {
        RepoError::Duplicate("An active order already exists for this course".to_string())
    } else {
        RepoError::Database(e.to_string())
    }
}

/// Projection shared by the detail and listing queries
const DETAIL_FIELDS: &str = "\
    <string>id AS order_id, \
    <string>course AS course_id, \
    course.title AS course_title, \
    course.cover AS course_cover, \
    <string>course.teacher AS teacher_id, \
    course.teacher.real_name AS teacher_name, \
    <string>student AS student_id, \
    amount, \
    status, \
    booking_time, \
    payment_time, \
    completion_time, \
    cancellation_time, \
    cancellation_reason, \
    remark, \
    (SELECT <string>id AS review_id, rating, content, created_at \
        FROM review WHERE order_id = $parent.id)[0] AS review, \
    created_at, \
    updated_at";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Full order detail with course/teacher display fields and the review,
    /// if one exists
    pub async fn get_detail(&self, id: &str) -> RepoResult<Option<OrderDetail>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {DETAIL_FIELDS} FROM order WHERE id = $id"))
            .bind(("id", thing))
            .await?;
        let details: Vec<OrderDetail> = result.take(0)?;
        Ok(details.into_iter().next())
    }

    /// Create a pending order inside one transaction, enforcing the
    /// one-active-order-per-(student, course) invariant
    pub async fn create_exclusive(
        &self,
        student: RecordId,
        course: RecordId,
        amount: f64,
        booking_time: i64,
        remark: Option<String>,
        now: i64,
    ) -> RepoResult<Order> {
        self.base
            .db()
            .query(format!(
                r#"BEGIN TRANSACTION;
                LET $dup = (SELECT VALUE id FROM order
                    WHERE student = $student AND course = $course AND status != 'cancelled');
                IF array::len($dup) > 0 {{ THROW "{DUPLICATE_ORDER}" }};
                CREATE order SET
                    course = $course,
                    student = $student,
                    amount = $amount,
                    status = 'pending',
                    booking_time = $booking_time,
                    remark = $remark,
                    created_at = $now,
                    updated_at = $now;
                COMMIT TRANSACTION;"#
            ))
            .bind(("student", student.clone()))
            .bind(("course", course.clone()))
            .bind(("amount", amount))
            .bind(("booking_time", booking_time))
            .bind(("remark", remark))
            .bind(("now", now))
            .await
            .map_err(classify_booking_error)?
            .check()
            .map_err(classify_booking_error)?;

        // The committed active order is unique per (student, course)
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE student = $student AND course = $course \
                 AND status != 'cancelled' LIMIT 1",
            )
            .bind(("student", student))
            .bind(("course", course))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// pending → paid, conditional on the order still being pending
    pub async fn mark_paid(&self, order: RecordId, now: i64) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET status = 'paid', payment_time = $now, updated_at = $now \
                 WHERE status = 'pending' RETURN AFTER",
            )
            .bind(("order", order))
            .bind(("now", now))
            .await?;
        Ok(result.take::<Option<Order>>(0)?)
    }

    /// paid → completed, conditional on the order still being paid
    pub async fn mark_completed(&self, order: RecordId, now: i64) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET status = 'completed', completion_time = $now, updated_at = $now \
                 WHERE status = 'paid' RETURN AFTER",
            )
            .bind(("order", order))
            .bind(("now", now))
            .await?;
        Ok(result.take::<Option<Order>>(0)?)
    }

    /// expected → cancelled, conditional on the order still being in the
    /// state the caller was authorized against
    pub async fn mark_cancelled(
        &self,
        order: RecordId,
        expected: OrderStatus,
        reason: Option<String>,
        now: i64,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET status = 'cancelled', cancellation_time = $now, \
                 cancellation_reason = $reason, updated_at = $now \
                 WHERE status = $expected RETURN AFTER",
            )
            .bind(("order", order))
            .bind(("expected", expected))
            .bind(("reason", reason))
            .bind(("now", now))
            .await?;
        Ok(result.take::<Option<Order>>(0)?)
    }

    /// Orders placed by a student, newest first
    pub async fn page_by_student(
        &self,
        student: RecordId,
        status: Option<OrderStatus>,
        keyword: Option<String>,
        params: &PaginationParams,
    ) -> RepoResult<Page<OrderDetail>> {
        self.page_by_owner("student = $owner", student, status, keyword, params)
            .await
    }

    /// Orders on a teacher's courses, newest first
    pub async fn page_by_teacher(
        &self,
        teacher: RecordId,
        status: Option<OrderStatus>,
        keyword: Option<String>,
        params: &PaginationParams,
    ) -> RepoResult<Page<OrderDetail>> {
        self.page_by_owner("course.teacher = $owner", teacher, status, keyword, params)
            .await
    }

    async fn page_by_owner(
        &self,
        owner_clause: &str,
        owner: RecordId,
        status: Option<OrderStatus>,
        keyword: Option<String>,
        params: &PaginationParams,
    ) -> RepoResult<Page<OrderDetail>> {
        let mut conditions = vec![owner_clause];
        if keyword.is_some() {
            conditions.push("course.title CONTAINS $keyword");
        } else if status.is_some() {
            conditions.push("status = $status");
        }
        let where_clause = conditions.join(" AND ");

        let sql = format!(
            "SELECT {DETAIL_FIELDS} FROM order WHERE {where_clause} \
             ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count_sql = format!("SELECT count() AS count FROM order WHERE {where_clause} GROUP ALL");

        let mut query = self
            .base
            .db()
            .query(sql)
            .query(count_sql)
            .bind(("owner", owner))
            .bind(("limit", params.limit() as i64))
            .bind(("start", params.offset() as i64));
        if let Some(k) = keyword {
            query = query.bind(("keyword", k));
        } else if let Some(s) = status {
            query = query.bind(("status", s));
        }

        let mut result = query.await?;
        let items: Vec<OrderDetail> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.into_iter().next().map(|r| r.count).unwrap_or(0);

        Ok(Page::new(items, total, params))
    }
}
