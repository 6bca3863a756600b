use order_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    let config = Config::from_env();

    let log_dir = config.log_to_file.then(|| config.log_dir());
    init_logger_with_file(&config.log_level, log_dir.as_deref())?;

    print_banner();
    tracing::info!(
        work_dir = %config.work_dir,
        tz = %config.business_tz,
        "Order server starting..."
    );

    // 2. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
