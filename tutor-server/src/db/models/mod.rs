//! Database Models

// Serde helpers
pub mod serde_helpers;

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
pub use user::{User, UserCreate, UserRole};
pub use course::{Course, CourseCreate, CourseStatus, DEFAULT_RATING};
pub use order::{Order, OrderCreate, OrderDetail, OrderReview, OrderStatus};
pub use review::{Review, ReviewCreate, ReviewUpdate};
pub use qualification::{
    Qualification, QualificationCreate, QualificationReview, QualificationStatus,
    QualificationType, ReviewVerdict,
};
pub use teacher_profile::{TeacherProfile, TeacherProfileCreate};
