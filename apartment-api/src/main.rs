use std::net::SocketAddr;
use std::sync::Arc;

use apartment_api::config::Config;
use apartment_api::error::AppError;
use apartment_api::infrastructure::database::mysql::init_mysql;
use apartment_api::logging::init_logging;
use apartment_api::scheduler::DuesScheduler;
use apartment_api::server::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    init_logging(&config.logging)?;

    tracing::info!("Starting apartment service");

    // 初始化数据库连接
    let db_pool = init_mysql(&config.database).await?;

    // 创建应用状态
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = Arc::new(AppState::from_pool(config, db_pool)?);

    // 启动会费定时任务
    let scheduler = DuesScheduler::start(app_state.clone()).await?;

    // 创建并启动服务器
    let app = create_app(app_state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", &addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    tracing::info!("Apartment service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时一直运行
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
