//! Teacher Profile Model
//!
//! 存储型教师资料，仅作为组合档案投影的兜底数据源，
//! 资质推导值优先于这里的字段。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Stored teacher profile (fallback fields for the composite projection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherProfile {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub education: Option<String>,
    pub major: Option<String>,
    pub experience: Option<String>,
    pub subjects: Vec<String>,
    pub created_at: i64,
}

/// Payload for creating a stored teacher profile
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherProfileCreate {
    pub education: Option<String>,
    pub major: Option<String>,
    pub experience: Option<String>,
    pub subjects: Vec<String>,
}
