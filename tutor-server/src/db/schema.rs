//! Schema Definitions
//!
//! SCHEMAFULL 表定义。字段断言保证状态枚举合法、评分在 1..=5 之内；
//! `uniq_review_order` 唯一索引是「一单一评」不变量的存储层兜底。
//!
//! 注意：`(student, course)` 的「至多一个未取消订单」不是全局唯一，
//! 无法用索引表达，由订单仓库的事务内检查强制。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::utils::{AppError, AppResult};

const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS user SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS username ON user TYPE string;
    DEFINE FIELD IF NOT EXISTS real_name ON user TYPE string;
    DEFINE FIELD IF NOT EXISTS email ON user TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS phone ON user TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS role ON user TYPE string
        ASSERT $value INSIDE ['student', 'teacher', 'admin'];
    DEFINE FIELD IF NOT EXISTS created_at ON user TYPE int;
    DEFINE INDEX IF NOT EXISTS uniq_user_username ON user FIELDS username UNIQUE;

    DEFINE TABLE IF NOT EXISTS course SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS teacher ON course TYPE record<user>;
    DEFINE FIELD IF NOT EXISTS title ON course TYPE string;
    DEFINE FIELD IF NOT EXISTS category ON course TYPE string;
    DEFINE FIELD IF NOT EXISTS duration ON course TYPE int ASSERT $value > 0;
    DEFINE FIELD IF NOT EXISTS price ON course TYPE number ASSERT $value >= 0;
    DEFINE FIELD IF NOT EXISTS description ON course TYPE string;
    DEFINE FIELD IF NOT EXISTS cover ON course TYPE string;
    DEFINE FIELD IF NOT EXISTS status ON course TYPE string
        ASSERT $value INSIDE ['pending', 'approved', 'rejected'];
    DEFINE FIELD IF NOT EXISTS rating ON course TYPE number;
    DEFINE FIELD IF NOT EXISTS student_count ON course TYPE int;
    DEFINE FIELD IF NOT EXISTS created_at ON course TYPE int;
    DEFINE FIELD IF NOT EXISTS updated_at ON course TYPE int;

    DEFINE TABLE IF NOT EXISTS order SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS course ON order TYPE record<course>;
    DEFINE FIELD IF NOT EXISTS student ON order TYPE record<user>;
    DEFINE FIELD IF NOT EXISTS amount ON order TYPE number ASSERT $value >= 0;
    DEFINE FIELD IF NOT EXISTS status ON order TYPE string
        ASSERT $value INSIDE ['pending', 'paid', 'completed', 'cancelled'];
    DEFINE FIELD IF NOT EXISTS booking_time ON order TYPE int;
    DEFINE FIELD IF NOT EXISTS payment_time ON order TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS completion_time ON order TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS cancellation_time ON order TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS cancellation_reason ON order TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS remark ON order TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS created_at ON order TYPE int;
    DEFINE FIELD IF NOT EXISTS updated_at ON order TYPE int;

    DEFINE TABLE IF NOT EXISTS review SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS order_id ON review TYPE record<order>;
    DEFINE FIELD IF NOT EXISTS course ON review TYPE record<course>;
    DEFINE FIELD IF NOT EXISTS student ON review TYPE record<user>;
    DEFINE FIELD IF NOT EXISTS rating ON review TYPE int
        ASSERT $value >= 1 AND $value <= 5;
    DEFINE FIELD IF NOT EXISTS content ON review TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON review TYPE int;
    DEFINE INDEX IF NOT EXISTS uniq_review_order ON review FIELDS order_id UNIQUE;

    DEFINE TABLE IF NOT EXISTS qualification SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS user ON qualification TYPE record<user>;
    DEFINE FIELD IF NOT EXISTS name ON qualification TYPE string;
    DEFINE FIELD IF NOT EXISTS type ON qualification TYPE string
        ASSERT $value INSIDE ['education', 'teaching', 'professional', 'language', 'other'];
    DEFINE FIELD IF NOT EXISTS issuer ON qualification TYPE string;
    DEFINE FIELD IF NOT EXISTS description ON qualification TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS file_url ON qualification TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS status ON qualification TYPE string
        ASSERT $value INSIDE ['pending', 'approved', 'rejected'];
    DEFINE FIELD IF NOT EXISTS review_comment ON qualification TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS review_date ON qualification TYPE option<int>;
    DEFINE FIELD IF NOT EXISTS upload_time ON qualification TYPE int;
    DEFINE FIELD IF NOT EXISTS update_time ON qualification TYPE int;

    DEFINE TABLE IF NOT EXISTS teacher_profile SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS user ON teacher_profile TYPE record<user>;
    DEFINE FIELD IF NOT EXISTS education ON teacher_profile TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS major ON teacher_profile TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS experience ON teacher_profile TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS subjects ON teacher_profile TYPE array<string>;
    DEFINE FIELD IF NOT EXISTS created_at ON teacher_profile TYPE int;
    DEFINE INDEX IF NOT EXISTS uniq_teacher_profile_user ON teacher_profile FIELDS user UNIQUE;
"#;

/// Apply all table/field/index definitions (idempotent)
pub async fn define(db: &Surreal<Db>) -> AppResult<()> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;
    tracing::info!("Database schema applied");
    Ok(())
}
