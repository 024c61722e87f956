//! Test helpers
//!
//! 每个测试用例拿到一个临时目录里的嵌入式数据库，进程退出即销毁。

use surrealdb::Surreal;
use surrealdb::engine::local::RocksDb;
use tempfile::TempDir;

use crate::core::{AppState, Config};
use crate::db::DbService;
use crate::db::models::{CourseCreate, OrderCreate, UserCreate, UserRole};
use crate::db::repository::{CourseRepository, TeacherProfileRepository, UserRepository};
use crate::utils::time::now_millis;

pub(crate) struct TestBackend {
    pub state: AppState,
    pub users: UserRepository,
    pub courses: CourseRepository,
    pub profiles: TeacherProfileRepository,
    _tmp: TempDir,
}

/// Fresh backend over a throwaway RocksDB instance
pub(crate) async fn backend() -> TestBackend {
    let tmp = tempfile::tempdir().unwrap();
    let db = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    let service = DbService::attach(db).await.unwrap();
    let handle = service.db().clone();
    let state = AppState::with_db(Config::default(), service);
    TestBackend {
        state,
        users: UserRepository::new(handle.clone()),
        courses: CourseRepository::new(handle.clone()),
        profiles: TeacherProfileRepository::new(handle),
        _tmp: tmp,
    }
}

impl TestBackend {
    /// Create a user and return its id string
    pub async fn create_user(&self, username: &str, role: UserRole) -> String {
        let user = self
            .users
            .create(UserCreate {
                username: username.to_string(),
                real_name: format!("{} Real", username),
                email: None,
                phone: None,
                role,
            })
            .await
            .unwrap();
        user.id.unwrap().to_string()
    }

    /// Create a course owned by `teacher_id` and return its id string
    pub async fn create_course(&self, teacher_id: &str, price: f64) -> String {
        let course = self
            .courses
            .create(
                teacher_id.parse().unwrap(),
                CourseCreate {
                    title: "Algebra Basics".to_string(),
                    category: "math".to_string(),
                    duration: 12,
                    price,
                    description: "Introductory algebra".to_string(),
                    cover: "covers/algebra.png".to_string(),
                },
            )
            .await
            .unwrap();
        course.id.unwrap().to_string()
    }

    /// Book a course and return the order id
    pub async fn book(&self, student_id: &str, course_id: &str) -> String {
        let order = self
            .state
            .orders
            .create(
                student_id,
                OrderCreate {
                    course_id: course_id.to_string(),
                    booking_time: now_millis(),
                    remark: None,
                },
            )
            .await
            .unwrap();
        order.id.unwrap().to_string()
    }

    /// Book + pay, returning the order id
    pub async fn paid_order(&self, student_id: &str, course_id: &str) -> String {
        let order_id = self.book(student_id, course_id).await;
        self.state.orders.pay(&order_id, student_id).await.unwrap();
        order_id
    }

    /// Book + pay + complete, returning the order id
    pub async fn completed_order(
        &self,
        student_id: &str,
        teacher_id: &str,
        course_id: &str,
    ) -> String {
        let order_id = self.paid_order(student_id, course_id).await;
        self.state
            .orders
            .complete(&order_id, teacher_id)
            .await
            .unwrap();
        order_id
    }
}
