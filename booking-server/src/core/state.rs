use std::sync::Arc;

use shared::{AppError, DiscountTokenService};
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | jwt_service | Arc<JwtService> | 会话 JWT 服务 |
/// | discount_tokens | Arc<DiscountTokenService> | 折扣令牌铸造 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 会话 JWT 服务
    pub jwt_service: Arc<JwtService>,
    /// 折扣令牌服务 (与 discount-server 仅共享签名密钥)
    pub discount_tokens: Arc<DiscountTokenService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (连接池 + 迁移 + 默认账号)
    /// 2. JWT 服务
    /// 3. 折扣令牌服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_path).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let discount_tokens = Arc::new(DiscountTokenService::new(&config.discount_token_secret));

        Ok(Self {
            config: config.clone(),
            pool: db_service.pool,
            jwt_service,
            discount_tokens,
        })
    }
}
