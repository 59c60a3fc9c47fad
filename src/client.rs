// 代理客户端模块

use crate::config::{AppConfig, BrokerEndpoint};
use crate::mapper::map_windows_path;
use crate::protocol::OpenResponse;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// 客户端内部错误
///
/// 只用于日志；对调用方来说所有失败统一表现为 None。
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("构建 HTTP 客户端失败: {0}")]
    Build(#[source] reqwest::Error),
    #[error("请求代理服务失败: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("响应解析失败: {0}")]
    Decode(#[source] reqwest::Error),
}

/// 远程对话框客户端
///
/// 每次调用只发起一次请求，超时后放弃，不做重试；重试策略
/// 属于上层的回退流程，不属于这里。
#[derive(Debug, Clone)]
pub struct DialogClient {
    endpoint: Option<BrokerEndpoint>,
    mount_prefix: Option<String>,
}

impl DialogClient {
    /// 从应用配置创建客户端
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoint: config.broker.clone(),
            mount_prefix: config.mount.mount_prefix.clone(),
        }
    }

    /// 请求远程主机上选择的文件路径
    ///
    /// 未配置端点时立即返回 None，不发起任何网络请求。
    /// 网络失败、响应不合法、用户取消统一返回 None——调用方
    /// 不需要区分这几种情况，都进入下一回退层。
    /// 成功拿到的路径会先经过盘符挂载映射再返回。
    pub async fn request_remote_path(&self) -> Option<String> {
        let endpoint = self.endpoint.as_ref()?;

        match self.try_request(endpoint).await {
            Ok(Some(path)) if !path.is_empty() => {
                debug!("远程对话框返回: {}", path);
                Some(map_windows_path(&path, self.mount_prefix.as_deref()))
            }
            Ok(_) => {
                debug!("远程对话框未选择文件");
                None
            }
            Err(e) => {
                debug!("远程对话框请求失败: {}", e);
                None
            }
        }
    }

    /// 发起一次 GET /open 请求
    async fn try_request(&self, endpoint: &BrokerEndpoint) -> Result<Option<String>, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(endpoint.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        let url = format!("http://{}:{}/open", endpoint.host, endpoint.port);
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::Transport)?
            .error_for_status()
            .map_err(ClientError::Transport)?;

        let body: OpenResponse = response.json().await.map_err(ClientError::Decode)?;
        Ok(body.path)
    }
}
