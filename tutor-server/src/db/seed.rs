//! Startup Seeding
//!
//! 首次启动（空库）时创建默认管理员账号，之后的启动不做任何事。

use crate::db::models::{UserCreate, UserRole};
use crate::db::repository::UserRepository;
use crate::utils::AppResult;

/// Create the default admin user if the store is empty
pub async fn run(users: &UserRepository) -> AppResult<()> {
    if users.count().await? > 0 {
        return Ok(());
    }

    let admin = users
        .create(UserCreate {
            username: "admin".to_string(),
            real_name: "Administrator".to_string(),
            email: None,
            phone: None,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!(user = %admin.username, "Default admin user created");
    Ok(())
}
