//! 服务器启动错误
//!
//! 只覆盖启动和监听阶段。请求级错误走 [`shared::error::AppError`]。

use crate::orders::OrderError;
use crate::services::ledger::LedgerError;
use thiserror::Error;

/// 服务器错误
#[derive(Debug, Error)]
pub enum ServerError {
    /// 工作目录无法创建
    #[error("工作目录不可用 {path}: {source}")]
    WorkDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 订单库打开失败
    #[error("订单库初始化失败: {0}")]
    Storage(#[from] OrderError),

    /// 账本日志打开失败
    #[error("账本日志不可用: {0}")]
    Ledger(#[from] LedgerError),

    /// 端口绑定或监听失败
    #[error("HTTP 监听失败: {0}")]
    Listen(#[source] std::io::Error),

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器结果类型
pub type Result<T> = std::result::Result<T, ServerError>;
