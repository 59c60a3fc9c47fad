// 选择回退流程模块
//
// 原实现用嵌套的异常捕获表达回退顺序；这里改写为显式的有序
// 回退层列表：每层实现统一的"尝试一次选择，返回可选路径"
// 接口，由解析器依次执行，拿到第一个非空结果即终止。

use crate::client::DialogClient;
use crate::config::AppConfig;
use crate::picker::{FilePicker, NativeFilePicker};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 一个回退层
///
/// 失败与用户取消统一表现为 None，任何层都不向外抛错。
#[async_trait]
pub trait SelectionTier: Send + Sync {
    /// 层名称（用于日志）
    fn name(&self) -> &'static str;

    /// 尝试一次选择
    async fn attempt(&self) -> Option<String>;
}

/// 第一层: 远程代理
pub struct RemoteTier {
    client: DialogClient,
}

impl RemoteTier {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: DialogClient::new(config),
        }
    }
}

#[async_trait]
impl SelectionTier for RemoteTier {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn attempt(&self) -> Option<String> {
        self.client.request_remote_path().await
    }
}

/// 第二层: 本机原生对话框
pub struct NativeTier {
    picker: Arc<dyn FilePicker>,
}

impl NativeTier {
    pub fn new(picker: Arc<dyn FilePicker>) -> Self {
        Self { picker }
    }
}

#[async_trait]
impl SelectionTier for NativeTier {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn attempt(&self) -> Option<String> {
        let picker = Arc::clone(&self.picker);
        // 模态对话框阻塞到用户响应，放到阻塞线程池执行。
        // 平台不支持、原生调用报错、panic 都视为本层无结果。
        match tokio::task::spawn_blocking(move || picker.pick_file()).await {
            Ok(Ok(Some(path))) if !path.is_empty() => Some(path),
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                debug!("原生对话框调用失败: {}", e);
                None
            }
            Err(e) => {
                debug!("原生对话框任务异常: {}", e);
                None
            }
        }
    }
}

/// 第三层: GUI 工具包自带的通用对话框
///
/// UI 渲染不在本库范围内，由调用方注入一个打开对话框的闭包。
pub struct ToolkitTier {
    open: Box<dyn Fn() -> Option<String> + Send + Sync>,
}

impl ToolkitTier {
    pub fn new(open: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            open: Box::new(open),
        }
    }
}

#[async_trait]
impl SelectionTier for ToolkitTier {
    fn name(&self) -> &'static str {
        "toolkit"
    }

    async fn attempt(&self) -> Option<String> {
        (self.open)().filter(|p| !p.is_empty())
    }
}

/// 选择解析器
///
/// GUI 层消费的唯一入口。按顺序执行各回退层，第一个非空结果
/// 即为最终结果；所有层都无结果时返回 None。层不会被重复执行，
/// 对调用方永远不抛错。
pub struct SelectionResolver {
    tiers: Vec<Box<dyn SelectionTier>>,
}

impl SelectionResolver {
    /// 使用显式的层列表创建
    pub fn new(tiers: Vec<Box<dyn SelectionTier>>) -> Self {
        Self { tiers }
    }

    /// 标准的两层: 远程代理 + 本机原生对话框
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(vec![
            Box::new(RemoteTier::new(config)),
            Box::new(NativeTier::new(Arc::new(NativeFilePicker))),
        ])
    }

    /// 追加 GUI 工具包的通用对话框作为最后一层
    pub fn with_toolkit_fallback(
        mut self,
        open: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.tiers.push(Box::new(ToolkitTier::new(open)));
        self
    }

    /// 解析一个文件路径
    pub async fn resolve(&self) -> Option<String> {
        for tier in &self.tiers {
            if let Some(path) = tier.attempt().await {
                debug!("{} 层选中文件: {}", tier.name(), path);
                return Some(path);
            }
            debug!("{} 层无结果，进入下一层", tier.name());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 返回固定结果并记录调用次数的假层
    struct FixedTier {
        label: &'static str,
        result: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl FixedTier {
        fn boxed(
            label: &'static str,
            result: Option<&str>,
            calls: &Arc<AtomicUsize>,
        ) -> Box<dyn SelectionTier> {
            Box::new(Self {
                label,
                result: result.map(str::to_string),
                calls: Arc::clone(calls),
            })
        }
    }

    #[async_trait]
    impl SelectionTier for FixedTier {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn attempt(&self) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// 原生调用失败的假选择器
    struct FailingPicker;

    impl FilePicker for FailingPicker {
        fn pick_file(&self) -> anyhow::Result<Option<String>> {
            Err(anyhow!("GetOpenFileNameW 调用失败"))
        }
    }

    #[tokio::test]
    async fn test_first_tier_success_short_circuits() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));

        let resolver = SelectionResolver::new(vec![
            FixedTier::boxed("remote", Some("/mnt/win/C/a.log"), &first),
            FixedTier::boxed("native", Some("/tmp/other.log"), &second),
            FixedTier::boxed("toolkit", Some("/tmp/third.log"), &third),
        ]);

        assert_eq!(resolver.resolve().await.as_deref(), Some("/mnt/win/C/a.log"));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0, "第一层命中后不应再执行后续层");
        assert_eq!(third.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_in_order() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let resolver = SelectionResolver::new(vec![
            FixedTier::boxed("remote", None, &first),
            FixedTier::boxed("native", Some("/tmp/picked.log"), &second),
        ]);

        assert_eq!(resolver.resolve().await.as_deref(), Some("/tmp/picked.log"));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_tiers_empty_resolves_to_none() {
        let calls = Arc::new(AtomicUsize::new(0));

        let resolver = SelectionResolver::new(vec![
            FixedTier::boxed("remote", None, &calls),
            FixedTier::boxed("native", None, &calls),
            FixedTier::boxed("toolkit", None, &calls),
        ]);

        assert!(resolver.resolve().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 3, "每层恰好尝试一次");
    }

    #[tokio::test]
    async fn test_failing_native_picker_falls_through_to_toolkit() {
        let resolver = SelectionResolver::new(vec![Box::new(NativeTier::new(Arc::new(
            FailingPicker,
        )))])
        .with_toolkit_fallback(|| Some("/tmp/toolkit.log".to_string()));

        assert_eq!(resolver.resolve().await.as_deref(), Some("/tmp/toolkit.log"));
    }

    #[tokio::test]
    async fn test_toolkit_empty_string_is_no_selection() {
        let resolver =
            SelectionResolver::new(vec![]).with_toolkit_fallback(|| Some(String::new()));
        assert!(resolver.resolve().await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_remote_tier_yields_none() {
        // 未配置端点的远程层直接落空
        let config = AppConfig::from_lookup(|_| None);
        let resolver = SelectionResolver::new(vec![Box::new(RemoteTier::new(&config))]);
        assert!(resolver.resolve().await.is_none());
    }
}
