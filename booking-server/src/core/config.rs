use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | concerts.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3001 | HTTP 服务端口 |
/// | JWT_SECRET | (开发环境自动生成) | 会话 JWT 密钥 |
/// | DISCOUNT_TOKEN_SECRET | (开发环境默认值) | 折扣令牌共享密钥 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/concerts.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 折扣令牌共享密钥 (与 discount-server 共享)
    pub discount_token_secret: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "concerts.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            jwt: JwtConfig::default(),
            discount_token_secret: load_discount_secret(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 从环境变量加载折扣令牌密钥
///
/// The discount service must be started with the same value; the secret is
/// the only thing the two services share.
pub(crate) fn load_discount_secret() -> String {
    match std::env::var("DISCOUNT_TOKEN_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "DISCOUNT_TOKEN_SECRET is shorter than 32 characters, using development key"
                );
                dev_discount_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("DISCOUNT_TOKEN_SECRET must be at least 32 characters long");
            }
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("DISCOUNT_TOKEN_SECRET not set, using development key");
                dev_discount_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("DISCOUNT_TOKEN_SECRET environment variable must be set in production!");
            }
        }
    }
}

#[cfg(debug_assertions)]
fn dev_discount_secret() -> String {
    "dev-only-discount-secret-change-me-in-production".to_string()
}
