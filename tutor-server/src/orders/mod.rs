//! Order Lifecycle
//!
//! 订单状态机与授权限定的转换引擎。
//!
//! # 状态转换表
//!
//! | 当前状态 | 操作 | 允许的操作者 | 结果状态 |
//! |----------|----------|--------------|----------|
//! | -        | create   | 学生         | pending  |
//! | pending  | pay      | 订单学生     | paid     |
//! | pending  | cancel   | 订单学生     | cancelled |
//! | paid     | cancel   | 课程教师     | cancelled |
//! | paid     | complete | 课程教师     | completed |
//!
//! 其余组合一律失败：非订单参与方是 `Forbidden`，
//! 参与方在错误状态下操作是 `InvalidState`。重复执行同一转换不是幂等
//! 成功，而是 `InvalidState`。

pub mod lifecycle;

#[cfg(test)]
mod tests;

pub use lifecycle::OrderLifecycle;
