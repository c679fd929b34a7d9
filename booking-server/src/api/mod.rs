//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证和折扣令牌接口
//! - [`concerts`] - 音乐会目录和座位图接口
//! - [`reservations`] - 预订/取消接口

pub mod auth;
pub mod concerts;
pub mod health;
pub mod reservations;
