use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{debug, error, info, warn};

use crate::{
    error::Result,
    models::{
        notification::{Notification, PanelState},
        response::MessageResponse,
        view::{NotificationView, EMPTY_PLACEHOLDER, LOAD_FAILED_PLACEHOLDER},
    },
    services::api::NotificationApi,
};

const MARK_ALL_FALLBACK: &str = "Marked all as read.";
const APPROVE_FALLBACK: &str = "Booking approved.";

/// 同一资源的请求序号
///
/// 响应只有在没有更新的响应被应用过时才会被渲染，晚到的旧响应直接丢弃。
#[derive(Debug, Default)]
struct RequestSequence {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequence {
    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn try_apply(&self, seq: u64) -> bool {
        self.applied.fetch_max(seq, Ordering::SeqCst) < seq
    }
}

/// 通知面板控制器：未读数、列表、全部已读、审批后的刷新
pub struct NotificationPanelController {
    api: Arc<dyn NotificationApi>,
    view: Arc<dyn NotificationView>,
    panel: Mutex<PanelState>,
    unread_seq: RequestSequence,
    list_seq: RequestSequence,
}

impl NotificationPanelController {
    pub fn new(api: Arc<dyn NotificationApi>, view: Arc<dyn NotificationView>) -> Self {
        Self {
            api,
            view,
            panel: Mutex::new(PanelState::Closed),
            unread_seq: RequestSequence::default(),
            list_seq: RequestSequence::default(),
        }
    }

    pub fn panel_state(&self) -> PanelState {
        *self.panel.lock()
    }

    /// 后台刷新未读数；失败只记录日志，保留当前显示的值
    pub async fn fetch_unread_count(&self) -> Result<u64> {
        let seq = self.unread_seq.issue();

        match self.api.unread_count().await {
            Ok(summary) => {
                if !self.unread_seq.try_apply(seq) {
                    debug!("Discarding superseded unread count response #{}", seq);
                } else if self.view.is_attached() {
                    self.view.set_unread_count(summary.unread_count);
                }
                Ok(summary.unread_count)
            }
            Err(e) => {
                warn!("Failed to refresh unread count: {}", e);
                Err(e)
            }
        }
    }

    /// 点击铃铛：关闭时打开并加载列表，打开时仅关闭
    pub async fn toggle_panel(&self) -> PanelState {
        let state = {
            let mut panel = self.panel.lock();
            *panel = panel.toggled();
            *panel
        };

        if self.view.is_attached() {
            self.view.set_panel_state(state);
        }

        if state.is_open() {
            // 错误已在内部记录并渲染为失败文案
            let _ = self.fetch_notification_list().await;
        }

        state
    }

    /// 加载通知列表并整体替换面板内容
    pub async fn fetch_notification_list(&self) -> Result<Vec<Notification>> {
        let seq = self.list_seq.issue();
        let result = self.api.list_notifications().await;

        if !self.list_seq.try_apply(seq) {
            debug!("Discarding superseded notification list response #{}", seq);
            return result;
        }
        if !self.view.is_attached() {
            debug!("Notification panel detached, skipping render");
            return result;
        }

        match &result {
            Ok(items) if items.is_empty() => self.view.render_placeholder(EMPTY_PLACEHOLDER),
            Ok(items) => self.view.render_notifications(items),
            Err(e) => {
                error!("Notification fetch error: {}", e);
                self.view.render_placeholder(LOAD_FAILED_PLACEHOLDER);
            }
        }

        result
    }

    /// 全部标记为已读；成功时未读数直接置 0
    pub async fn mark_all_read(&self) -> Result<MessageResponse> {
        match self.api.mark_all_as_read().await {
            Ok(response) => {
                // 之前发出的未读数请求不能再覆盖这个 0
                let seq = self.unread_seq.issue();
                self.unread_seq.try_apply(seq);
                if self.view.is_attached() {
                    self.view.set_unread_count(0);
                }
                info!("All notifications marked as read");
                self.view.alert(&response.message_or(MARK_ALL_FALLBACK));
                Ok(response)
            }
            Err(e) => {
                error!("Error marking all as read: {}", e);
                self.view.alert(&e.user_message());
                Err(e)
            }
        }
    }

    /// 标记单条通知为已读，随后刷新未读数
    pub async fn mark_as_read(&self, notification_id: i64) -> Result<MessageResponse> {
        let result = self.api.mark_as_read(notification_id).await;
        if let Err(e) = &result {
            error!("Error marking notification {} as read: {}", notification_id, e);
            self.view.alert(&e.user_message());
        }
        self.refresh_after_action(&result).await;
        result
    }

    /// 审批预订，成功后刷新未读数
    pub async fn approve_booking(&self, booking_id: &str) -> Result<MessageResponse> {
        let result = self.api.approve_booking(booking_id).await;
        self.refresh_after_action(&result).await;

        match &result {
            Ok(response) => {
                info!("Booking {} approved", booking_id);
                self.view.alert(&response.message_or(APPROVE_FALLBACK));
            }
            Err(e) => {
                error!("Booking approval error: {}", e);
                self.view.alert(&e.user_message());
            }
        }

        result
    }

    /// 状态变更成功后重新拉取一次未读数；徽标只取自这次拉取，而不是操作的响应体
    pub async fn refresh_after_action<T>(&self, action: &Result<T>) {
        if action.is_ok() {
            let _ = self.fetch_unread_count().await;
        }
    }
}
