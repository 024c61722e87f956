//! Utility Module
//!
//! Cross-cutting helpers: errors, results, time, validation, logging.

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod types;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;
pub use types::{Page, PaginationParams};
