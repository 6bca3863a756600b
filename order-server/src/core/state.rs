//! 服务器状态
//!
//! [`ServerState`] 持有订单引擎和它的协作服务，随 axum Router 克隆分发。

use std::sync::Arc;

use crate::core::{Config, Result, ServerError};
use crate::orders::{Collaborators, Numbering, OrdersManager};
use crate::services::{
    CatalogService, CustomerDirectory, JournalLedger, LedgerService, LedgerWorker, RateBoard,
    SeedData,
};

/// 服务器状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 启动配置 |
/// | orders | 订单引擎 (redb) |
/// | catalog | 商品目录与库存 |
/// | customers | 客户主数据 |
/// | rates | 参考金价 |
/// | ledger | 账本出队 (best-effort) |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub orders: Arc<OrdersManager>,
    pub catalog: Arc<CatalogService>,
    pub customers: Arc<CustomerDirectory>,
    pub rates: Arc<RateBoard>,
    pub ledger: LedgerService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. 种子数据 (work_dir/seed.json，可缺省)
    /// 3. 账本出队和后台写入任务 (work_dir/ledger.jsonl)
    /// 4. 订单库 (work_dir/orders.redb)
    ///
    /// 必须在 tokio 运行时内调用。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let work_dir = config.work_dir_path();
        std::fs::create_dir_all(&work_dir).map_err(|source| ServerError::WorkDir {
            path: work_dir.display().to_string(),
            source,
        })?;

        let seed = SeedData::load(config.seed_path())?;
        let catalog = Arc::new(CatalogService::with_items(seed.catalog));
        let customers = Arc::new(CustomerDirectory::with_customers(seed.customers));
        let rates = Arc::new(RateBoard::new(seed.rates));

        let (ledger, ledger_rx) = LedgerService::new(config.ledger_queue_capacity);
        let journal = JournalLedger::open(config.ledger_journal_path())?;
        let worker = LedgerWorker::new(Arc::new(journal), ledger.counters());
        tokio::spawn(worker.run(ledger_rx));

        let services = Collaborators {
            customers: customers.clone(),
            catalog: catalog.clone(),
            rates: rates.clone(),
        };
        let numbering = Numbering {
            order_prefix: config.order_number_prefix.clone(),
            invoice_prefix: config.invoice_number_prefix.clone(),
            tz: config.business_tz,
        };
        let mut orders =
            OrdersManager::new(config.database_path(), services, ledger.clone(), numbering)?;
        orders.set_alert_hours(config.delivery_alert_hours);

        tracing::info!(
            work_dir = %work_dir.display(),
            customers = customers.len(),
            catalog = catalog.list().len(),
            "Server state initialized"
        );

        Ok(Self {
            config: config.clone(),
            orders: Arc::new(orders),
            catalog,
            customers,
            rates,
            ledger,
        })
    }
}
