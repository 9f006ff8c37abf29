use parking_lot::Mutex;

use crate::models::notification::{Notification, PanelState};

/// 空列表时渲染的占位文案
pub const EMPTY_PLACEHOLDER: &str = "No notifications.";
/// 列表加载失败时渲染的文案
pub const LOAD_FAILED_PLACEHOLDER: &str = "Failed to load notifications.";

/// 通知面板的渲染目标
///
/// 页面元素可能在响应返回前被移除，此时 `is_attached` 返回 false，控制器不再写入。
pub trait NotificationView: Send + Sync {
    fn is_attached(&self) -> bool;
    fn set_unread_count(&self, count: u64);
    fn set_panel_state(&self, state: PanelState);
    /// 整体替换面板内容
    fn render_notifications(&self, items: &[Notification]);
    fn render_placeholder(&self, text: &str);
    fn alert(&self, message: &str);
}

/// 页面跳转
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// 面板内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelContent {
    #[default]
    Empty,
    Items(Vec<Notification>),
    Placeholder(String),
}

#[derive(Debug, Clone, Default)]
pub struct PanelSnapshot {
    pub attached: bool,
    pub unread_count: Option<u64>,
    pub panel: PanelState,
    pub content: PanelContent,
    pub alerts: Vec<String>,
}

/// 内存中的视图模型，记录最后一次渲染的结果
#[derive(Debug)]
pub struct PanelViewModel {
    inner: Mutex<PanelSnapshot>,
}

impl Default for PanelViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelViewModel {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PanelSnapshot {
                attached: true,
                ..PanelSnapshot::default()
            }),
        }
    }

    /// 模拟元素被移出页面
    pub fn detach(&self) {
        self.inner.lock().attached = false;
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        self.inner.lock().clone()
    }

    pub fn unread_count(&self) -> Option<u64> {
        self.inner.lock().unread_count
    }

    pub fn content(&self) -> PanelContent {
        self.inner.lock().content.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.lock().alerts.clone()
    }
}

impl NotificationView for PanelViewModel {
    fn is_attached(&self) -> bool {
        self.inner.lock().attached
    }

    fn set_unread_count(&self, count: u64) {
        self.inner.lock().unread_count = Some(count);
    }

    fn set_panel_state(&self, state: PanelState) {
        self.inner.lock().panel = state;
    }

    fn render_notifications(&self, items: &[Notification]) {
        self.inner.lock().content = PanelContent::Items(items.to_vec());
    }

    fn render_placeholder(&self, text: &str) {
        self.inner.lock().content = PanelContent::Placeholder(text.to_string());
    }

    fn alert(&self, message: &str) {
        self.inner.lock().alerts.push(message.to_string());
    }
}

/// 记录跳转目标的导航器
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visited.lock().push(path.to_string());
    }
}
