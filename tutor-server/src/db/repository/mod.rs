//! Repository Module
//!
//! Provides storage access for SurrealDB tables. Every read-modify-write
//! unit is a single `BEGIN TRANSACTION … COMMIT TRANSACTION` query; state
//! transitions are conditional updates that re-check the expected status at
//! commit time.

// Identity
pub mod user;

// Catalog
pub mod course;

// Orders
pub mod order;

// Reviews
pub mod review;

// Qualifications
pub mod qualification;
pub mod teacher_profile;

// Re-exports
pub use course::CourseRepository;
pub use order::OrderRepository;
pub use qualification::QualificationRepository;
pub use review::ReviewRepository;
pub use teacher_profile::TeacherProfileRepository;
pub use user::UserRepository;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Row shape of `SELECT count() … GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "order:abc".parse()?;
//   - 获取表名: id.table()
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
