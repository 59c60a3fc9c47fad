// 配置管理模块

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// 环境变量: 远程代理地址（host:port），未设置时禁用远程层
pub const ENV_BROKER: &str = "REMOTE_WIN_DIALOG";
/// 环境变量: 请求超时秒数（默认 30）
pub const ENV_TIMEOUT: &str = "REMOTE_WIN_TIMEOUT";
/// 环境变量: Windows 盘符映射的挂载根（如 /mnt/win），未设置时路径原样通过
pub const ENV_MOUNT_PREFIX: &str = "REMOTE_WIN_MOUNT_PREFIX";
/// 环境变量: 服务端监听地址（默认 0.0.0.0:5005）
pub const ENV_BIND: &str = "WIN_DIALOG_BIND";
/// 环境变量: 日志文件目录，未设置时仅控制台输出
pub const ENV_LOG_DIR: &str = "WIN_DIALOG_LOG_DIR";

/// 应用配置
///
/// 启动时从环境变量读取一次，之后不可变。客户端、回退流程和
/// 服务端只接收这个结构体，运行期间不再访问环境变量。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 远程代理端点（None 表示远程层禁用，不是错误）
    #[serde(default)]
    pub broker: Option<BrokerEndpoint>,
    /// 盘符挂载映射
    #[serde(default)]
    pub mount: MountMapping,
    /// 服务端配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 远程代理端点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerEndpoint {
    /// 主机名或 IP
    pub host: String,
    /// 端口
    pub port: u16,
    /// 请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

/// 盘符挂载映射
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MountMapping {
    /// Linux 侧挂载根，如 /mnt/win（C:\a\b.txt -> /mnt/win/C/a/b.txt）
    pub mount_prefix: Option<String>,
}

/// 服务端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    pub bind: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 日志文件目录，None 表示仅控制台输出
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> f64 {
    30.0
}

fn default_bind() -> String {
    "0.0.0.0:5005".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从注入的查找函数读取配置
    ///
    /// 测试通过传入自定义查找函数构造配置，不需要修改进程环境变量。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = match lookup(ENV_TIMEOUT) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v > 0.0 && v.is_finite() => v,
                _ => {
                    warn!("{} 无法解析为秒数: {:?}，使用默认 30 秒", ENV_TIMEOUT, raw);
                    default_timeout_secs()
                }
            },
            None => default_timeout_secs(),
        };

        let broker = lookup(ENV_BROKER).and_then(|raw| parse_endpoint(&raw, timeout_secs));

        let mount = MountMapping {
            mount_prefix: lookup(ENV_MOUNT_PREFIX).filter(|p| !p.is_empty()),
        };

        let server = ServerConfig {
            bind: lookup(ENV_BIND)
                .filter(|b| !b.is_empty())
                .unwrap_or_else(default_bind),
        };

        let log = LogConfig {
            level: default_log_level(),
            log_dir: lookup(ENV_LOG_DIR).filter(|d| !d.is_empty()).map(PathBuf::from),
        };

        Self {
            broker,
            mount,
            server,
            log,
        }
    }
}

/// 解析 host:port 形式的端点地址
///
/// 格式不合法时告警并返回 None——配置问题与传输问题同样只是
/// 禁用远程层，不让进程启动失败。
fn parse_endpoint(raw: &str, timeout_secs: f64) -> Option<BrokerEndpoint> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => match port.parse::<u16>() {
            Ok(port) => Some(BrokerEndpoint {
                host: host.to_string(),
                port,
                timeout_secs,
            }),
            Err(_) => {
                warn!("{} 的端口无法解析: {:?}，远程层已禁用", ENV_BROKER, raw);
                None
            }
        },
        _ => {
            warn!("{} 的格式应为 host:port: {:?}，远程层已禁用", ENV_BROKER, raw);
            None
        }
    }
}
