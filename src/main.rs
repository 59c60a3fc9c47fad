use remote_dialog_rust::{config::AppConfig, logging, server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 配置只在启动时读取一次
    let config = AppConfig::from_env();

    // 初始化日志系统（必须保持 _log_guard 存活）
    let _log_guard = logging::init_logging(&config.log);

    info!("Remote Dialog Broker v{} 启动中...", env!("CARGO_PKG_VERSION"));

    server::run(&config).await
}
