//! Reviews
//!
//! 评价工作流（创建/修改/删除的授权与状态门禁）和课程评分聚合器。
//! 评价集合的每次变更都会在同一个事务内触发所属课程的评分重算。

pub mod aggregator;
pub mod workflow;

pub use aggregator::RatingAggregator;
pub use workflow::ReviewWorkflow;
