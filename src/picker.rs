// 原生文件选择对话框
//
// 平台相关的对话框细节收敛到这一个能力接口后面，协议与回退
// 逻辑保持平台无关，测试时可以替换成假实现。

use anyhow::Result;

/// 文件选择能力
///
/// 打开一个模态文件选择对话框，阻塞到用户响应为止。
/// `Ok(None)` 表示用户取消；`Err` 表示原生调用本身失败，
/// 调用侧负责把失败降级为"未选择"。
pub trait FilePicker: Send + Sync {
    fn pick_file(&self) -> Result<Option<String>>;
}

/// 基于 rfd 的原生对话框实现
#[derive(Debug, Default)]
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_file(&self) -> Result<Option<String>> {
        let picked = rfd::FileDialog::new()
            .set_title("Select log file")
            .add_filter("Log Files (*.log)", &["log"])
            .add_filter("All Files", &["*"])
            .pick_file();

        match picked {
            Some(path) => {
                let value = path.to_string_lossy().trim().to_string();
                Ok(if value.is_empty() { None } else { Some(value) })
            }
            None => Ok(None),
        }
    }
}
