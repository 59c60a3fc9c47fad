// API处理器模块

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::protocol::{HealthResponse, OpenResponse};
use crate::server::state::AppState;

/// GET /open
/// 打开原生文件选择对话框，阻塞到用户响应，返回选中的路径
///
/// 对话框在阻塞线程池里运行，监听循环照常接受新连接。
/// 原生层的任何失败（包括 panic）都转换成 `{"path": null}`。
pub async fn open_dialog(State(state): State<AppState>) -> Json<OpenResponse> {
    // 同一时间只开一个对话框，后续请求在此排队
    let _guard = state.dialog_lock.lock().await;

    let picker = Arc::clone(&state.picker);
    let path = match tokio::task::spawn_blocking(move || picker.pick_file()).await {
        Ok(Ok(path)) => path.filter(|p| !p.is_empty()),
        Ok(Err(e)) => {
            warn!("原生对话框调用失败: {}", e);
            None
        }
        Err(e) => {
            warn!("原生对话框任务异常: {}", e);
            None
        }
    };

    debug!("对话框结果: {:?}", path);
    Json(OpenResponse { path })
}

/// GET /health
/// 健康检查，不经过对话框锁
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// 未知路径统一返回 404，空响应体
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
