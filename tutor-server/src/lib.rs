//! Tutor Server - 家教市场后端核心
//!
//! # 架构概述
//!
//! 本 crate 实现家教市场的领域核心：订单状态机、课程评分聚合、
//! 资质审核工作流和教师组合档案投影。认证、路由等传输层关注点
//! 由外部协作方承担，引擎只消费已解析的 (用户 ID, 角色)。
//!
//! - **订单** (`orders`): 授权限定的状态机 pending → paid → completed/cancelled
//! - **评价** (`reviews`): 评价门禁 + 课程评分事务内重算
//! - **资质** (`qualifications`): 提交/审核/批量审核工作流
//! - **教师** (`teachers`): 资质推导的组合档案（纯投影）
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//!
//! # 模块结构
//!
//! ```text
//! tutor-server/src/
//! ├── core/            # 配置、状态
//! ├── db/              # 数据库层（模型、仓库、schema、种子）
//! ├── orders/          # 订单状态机引擎
//! ├── reviews/         # 评价工作流 + 评分聚合器
//! ├── qualifications/  # 资质审核引擎
//! ├── teachers/        # 教师组合档案投影
//! └── utils/           # 错误、时间、验证、日志
//! ```

pub mod core;
pub mod db;
pub mod orders;
pub mod qualifications;
pub mod reviews;
pub mod teachers;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export 公共类型
pub use self::core::{AppState, Config};
pub use db::DbService;
pub use orders::OrderLifecycle;
pub use qualifications::{BatchReviewOutcome, QualificationModeration};
pub use reviews::{RatingAggregator, ReviewWorkflow};
pub use teachers::{TeacherCompositeProfile, TeacherProfileService};
pub use utils::{AppError, AppResult, Page, PaginationParams};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
