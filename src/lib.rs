//! 凭据校验与令牌签发服务
//! 核心：密码哈希、凭据校验、访问令牌签发与验证

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
