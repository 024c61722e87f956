use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderLifecycle;
use crate::qualifications::QualificationModeration;
use crate::reviews::{RatingAggregator, ReviewWorkflow};
use crate::teachers::TeacherProfileService;
use crate::utils::AppResult;

/// 应用状态 - 持有数据库句柄和四个引擎的共享引用
///
/// 引擎全部 Clone 浅拷贝（内部只是数据库句柄），调用方可以自由复制。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | 嵌入式数据库 |
/// | orders | OrderLifecycle | 订单状态机引擎 |
/// | reviews | ReviewWorkflow | 评价工作流 |
/// | ratings | RatingAggregator | 课程评分聚合器 |
/// | qualifications | QualificationModeration | 资质审核引擎 |
/// | teacher_profiles | TeacherProfileService | 教师组合档案投影 |
#[derive(Clone)]
pub struct AppState {
    /// 服务配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: DbService,
    /// 订单状态机引擎
    pub orders: OrderLifecycle,
    /// 评价工作流
    pub reviews: ReviewWorkflow,
    /// 课程评分聚合器
    pub ratings: RatingAggregator,
    /// 资质审核引擎
    pub qualifications: QualificationModeration,
    /// 教师组合档案投影
    pub teacher_profiles: TeacherProfileService,
}

impl AppState {
    /// 打开工作目录下的数据库并构造所有引擎
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let db = DbService::open(&config.work_dir).await?;
        Ok(Self::with_db(config, db))
    }

    /// 用已就绪的数据库构造状态（测试用临时目录数据库走这里）
    pub fn with_db(config: Config, db: DbService) -> Self {
        let handle = db.db().clone();
        Self {
            config,
            orders: OrderLifecycle::new(handle.clone()),
            reviews: ReviewWorkflow::new(handle.clone()),
            ratings: RatingAggregator::new(handle.clone()),
            qualifications: QualificationModeration::new(handle.clone()),
            teacher_profiles: TeacherProfileService::new(handle),
            db,
        }
    }
}
