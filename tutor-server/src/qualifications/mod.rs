//! Qualifications
//!
//! 教师资质的提交与管理员审核工作流。
//! 批量审核是逐条独立事务的 best-effort 操作，单条失败不回滚其他条目。

pub mod moderation;

pub use moderation::{BatchReviewOutcome, QualificationModeration};
