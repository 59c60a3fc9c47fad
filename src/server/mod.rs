// Web服务器模块

pub mod handlers;
pub mod state;

pub use state::AppState;

use crate::config::AppConfig;
use crate::picker::NativeFilePicker;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// 构建路由
///
/// `GET /open` 打开对话框，`GET /health` 健康检查，
/// 其余路径统一 404 空响应体。
pub fn build_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http()) // HTTP 请求日志
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .route("/open", get(handlers::open_dialog))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(middleware)
        .with_state(state)
}

/// 启动代理服务
///
/// 本服务不做认证，只应部署在可信网络内，或由反向代理加一层
/// 认证后再暴露。
pub async fn run(config: &AppConfig) -> Result<()> {
    let state = AppState::new(Arc::new(NativeFilePicker));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("监听地址绑定失败: {}", config.server.bind))?;
    info!("代理服务监听: http://{}", config.server.bind);

    axum::serve(listener, app)
        .await
        .context("HTTP 服务异常退出")?;
    Ok(())
}
