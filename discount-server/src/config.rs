/// discount-server 配置，从环境变量读取
pub struct Config {
    /// 服务端口
    pub port: u16,
    /// 折扣令牌共享密钥 (与 booking-server 共享的唯一状态)
    pub token_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3002),
            token_secret: load_token_secret(),
        }
    }
}

/// 从环境变量加载令牌密钥
///
/// Must match the booking service's `DISCOUNT_TOKEN_SECRET`; the secret is
/// the entire trust boundary between the two services.
fn load_token_secret() -> String {
    match std::env::var("DISCOUNT_TOKEN_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "DISCOUNT_TOKEN_SECRET is shorter than 32 characters, using development key"
                );
                dev_token_secret()
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
                dev_token_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("DISCOUNT_TOKEN_SECRET environment variable must be set in production!");
            }
        }
    }
}

#[cfg(debug_assertions)]
fn dev_token_secret() -> String {
    "dev-only-discount-secret-change-me-in-production".to_string()
}
