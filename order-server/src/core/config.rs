use chrono_tz::Tz;
use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (redb、账本日志、种子数据、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_TO_FILE | false | 是否写入滚动日志文件 |
/// | BUSINESS_TZ | Asia/Kolkata | 业务时区 |
/// | LEDGER_QUEUE_CAPACITY | 1024 | 账本队列容量 |
/// | DELIVERY_ALERT_HOURS | 24 | 交付提醒窗口(小时) |
/// | ORDER_NUMBER_PREFIX | ORD | 订单号前缀 |
/// | INVOICE_NUMBER_PREFIX | INV | 发票号前缀 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/orders HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub log_level: String,
    pub log_to_file: bool,
    /// 业务时区 ("今天"/"本月" 的边界)
    pub business_tz: Tz,
    pub ledger_queue_capacity: usize,
    pub delivery_alert_hours: i64,
    pub order_number_prefix: String,
    pub invoice_number_prefix: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let business_tz = match std::env::var("BUSINESS_TZ") {
            Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(tz = %name, "Unknown BUSINESS_TZ, falling back to Asia/Kolkata");
                chrono_tz::Asia::Kolkata
            }),
            Err(_) => chrono_tz::Asia::Kolkata,
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_or("HTTP_PORT", 3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_to_file: env_or("LOG_TO_FILE", false),
            business_tz,
            ledger_queue_capacity: env_or("LEDGER_QUEUE_CAPACITY", 1024),
            delivery_alert_hours: env_or("DELIVERY_ALERT_HOURS", 24),
            order_number_prefix: std::env::var("ORDER_NUMBER_PREFIX")
                .unwrap_or_else(|_| "ORD".into()),
            invoice_number_prefix: std::env::var("INVOICE_NUMBER_PREFIX")
                .unwrap_or_else(|_| "INV".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// redb 订单库
    pub fn database_path(&self) -> PathBuf {
        self.work_dir_path().join("orders.redb")
    }

    /// 账本日志 (JSON lines)
    pub fn ledger_journal_path(&self) -> PathBuf {
        self.work_dir_path().join("ledger.jsonl")
    }

    pub fn seed_path(&self) -> PathBuf {
        self.work_dir_path().join("seed.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.work_dir_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
