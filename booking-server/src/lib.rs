//! Booking Server - concert seat inventory and online reservation service
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储，座位库存和票务数据
//! - **预订** (`reservation`): 原子预订/取消事务协议
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── db/            # 数据库层 (连接池 + 仓储)
//! ├── reservation/   # 预订事务管理
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reservation;
pub mod utils;

// Re-export 公共类型
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use shared::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;
