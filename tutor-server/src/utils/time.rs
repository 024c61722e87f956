//! 时间工具函数
//!
//! 所有业务时间戳统一为 `i64` Unix millis，
//! repository 层只接收和返回 millis，格式化在 DTO 投影层完成。

use chrono::{DateTime, Utc};

/// 当前 Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unix millis → "YYYY-MM-DD" (UTC)
///
/// 用于资质上传时间等仅需日期精度的展示字段。
pub fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
