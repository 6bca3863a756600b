//! Order Server - 珠宝订单引擎
//!
//! # 架构概述
//!
//! - **定价** (`pricing`): 金价解析和明细计价
//! - **订单** (`orders`): 订单聚合、结算、交付开票，redb 持久化
//! - **服务** (`services`): 客户、商品目录、参考金价、账本出队
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单引擎
//! ├── pricing/       # 金价与计价
//! ├── services/      # 协作服务
//! └── utils/         # 日志、时间、校验
//! ```

pub mod api;
pub mod core;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStorage, OrdersManager};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
  ___          _
 / _ \ _ __ __| | ___ _ __
| | | | '__/ _` |/ _ \ '__|
| |_| | | | (_| |  __/ |
 \___/|_|  \__,_|\___|_|
    "#
    );
}
