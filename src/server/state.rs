// 应用状态

use crate::picker::FilePicker;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 应用全局状态
#[derive(Clone)]
pub struct AppState {
    /// 原生对话框能力
    pub picker: Arc<dyn FilePicker>,
    /// 对话框串行锁: 同一时间只开一个对话框，其余请求排队
    pub dialog_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(picker: Arc<dyn FilePicker>) -> Self {
        Self {
            picker,
            dialog_lock: Arc::new(Mutex::new(())),
        }
    }
}
