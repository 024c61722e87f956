use crate::db::models::{OrderCreate, UserRole};
use crate::test_support::{TestBackend, backend};
use crate::utils::AppError;
use crate::utils::time::now_millis;

mod test_conflicts;
mod test_lifecycle;

// ========================================================================
// Helper: teacher + student + one course
// ========================================================================

async fn seed_marketplace(price: f64) -> (TestBackend, String, String, String) {
    let backend = backend().await;
    let teacher = backend.create_user("teacher1", UserRole::Teacher).await;
    let student = backend.create_user("student1", UserRole::Student).await;
    let course = backend.create_course(&teacher, price).await;
    (backend, teacher, student, course)
}

fn booking(course_id: &str) -> OrderCreate {
    OrderCreate {
        course_id: course_id.to_string(),
        booking_time: now_millis(),
        remark: None,
    }
}
