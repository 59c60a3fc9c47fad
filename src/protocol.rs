// 通信协议类型

use serde::{Deserialize, Serialize};

/// `GET /open` 的响应体
///
/// `path` 为 `null` 或空字符串表示用户取消或未选择文件。
/// 每次请求在服务端新建、序列化、传输、客户端反序列化后即丢弃，
/// 不做任何持久化，也不携带会话或身份信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenResponse {
    /// 选中的文件路径（服务端命名空间，如 `C:\...`）
    pub path: Option<String>,
}

/// `GET /health` 的响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
