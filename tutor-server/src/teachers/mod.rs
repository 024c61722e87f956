//! Teachers
//!
//! 教师组合档案：从资质集合按需推导的纯投影，从不落库。

pub mod profile;

pub use profile::{QualificationView, TeacherCompositeProfile, TeacherProfileService};
