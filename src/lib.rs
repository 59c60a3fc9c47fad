// Remote Dialog Rust Library
// 远程文件选择代理核心库

// 配置管理模块
pub mod config;

// 路径映射模块
pub mod mapper;

// 通信协议类型
pub mod protocol;

// 原生文件选择对话框
pub mod picker;

// 代理客户端模块
pub mod client;

// 选择回退流程模块
pub mod resolver;

// Web服务器模块
pub mod server;

// 日志系统
pub mod logging;

// 导出常用类型
pub use client::DialogClient;
pub use config::{AppConfig, BrokerEndpoint, LogConfig, MountMapping, ServerConfig};
pub use mapper::map_windows_path;
pub use picker::{FilePicker, NativeFilePicker};
pub use protocol::OpenResponse;
pub use resolver::{NativeTier, RemoteTier, SelectionResolver, SelectionTier, ToolkitTier};
pub use server::AppState;
