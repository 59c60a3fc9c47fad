// 日志系统配置
//
// 控制台输出始终开启；配置了日志目录时追加非阻塞的文件输出，
// 文件名带启动时间戳，每次启动新建一个文件。

use crate::config::LogConfig;
use chrono::Local;
use std::fs;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// 日志系统守卫
/// 必须保持存活，否则文件写入线程会终止
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// 初始化日志系统
///
/// RUST_LOG 设置时优先于配置中的级别。文件输出初始化失败只会
/// 回退到控制台，不会让进程启动失败。
pub fn init_logging(config: &LogConfig) -> LogGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_ansi(true);

    let Some(log_dir) = &config.log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
        info!("日志系统初始化完成（仅控制台输出）");
        return LogGuard { _file_guard: None };
    };

    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("创建日志目录失败: {:?}, 错误: {}，回退到仅控制台输出", log_dir, e);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
        return LogGuard { _file_guard: None };
    }

    // 文件名格式: remote-dialog.YYYY-MM-DD-HHMMSS.log
    let filename = format!("remote-dialog.{}.log", Local::now().format("%Y-%m-%d-%H%M%S"));
    let appender = tracing_appender::rolling::never(log_dir, filename);
    let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);

    // 文件输出层（不带 ANSI 颜色）
    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("日志系统初始化完成: 目录={:?}, 级别={}", log_dir, config.level);

    LogGuard {
        _file_guard: Some(file_guard),
    }
}
