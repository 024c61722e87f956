//! Bootstrap entry point
//!
//! 初始化工作目录下的嵌入式数据库：应用 schema，空库时写入默认管理员。
//! 传输层（HTTP 路由、认证）由外部协作方承担，不在本进程内。

use anyhow::Context;

use tutor_server::db::repository::UserRepository;
use tutor_server::db::seed;
use tutor_server::utils::logger::init_logger_with_file;
use tutor_server::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Starting tutor server core"
    );

    let state = AppState::initialize(config)
        .await
        .context("failed to initialize application state")?;

    let users = UserRepository::new(state.db.db().clone());
    seed::run(&users).await.context("failed to seed database")?;

    tracing::info!("Bootstrap complete");
    Ok(())
}
