use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::services::notification::NotificationPanelController;

/// 定时刷新未读数
pub struct NotificationPoller;

impl NotificationPoller {
    /// 立即拉取一次，之后按固定间隔拉取，直到句柄被停止或丢弃
    pub fn start(controller: Arc<NotificationPanelController>, period: Duration) -> PollingHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {}
                }

                // 请求进行中也要能响应停止信号；失败已在控制器内记录
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = controller.fetch_unread_count() => {}
                }
            }

            debug!("Notification poller received shutdown");
        });

        info!("Notification polling started every {:?}", period);

        PollingHandle {
            task: Some(task),
            shutdown: Some(shutdown_tx),
        }
    }
}

/// 轮询任务句柄，视图销毁时释放定时器
pub struct PollingHandle {
    task: Option<JoinHandle<()>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl PollingHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }

    /// 停止轮询并等待任务退出
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        info!("Notification polling stopped");
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Result,
        models::{
            notification::{Notification, NotificationSummary},
            response::MessageResponse,
            view::PanelViewModel,
        },
        services::api::{MockNotificationApi, NotificationApi},
    };
    use std::sync::atomic::{AtomicU64, Ordering};

    fn counting_controller(
        calls: Arc<AtomicU64>,
    ) -> (Arc<NotificationPanelController>, Arc<PanelViewModel>) {
        let mut api = MockNotificationApi::new();
        api.expect_unread_count().returning(move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(NotificationSummary { unread_count: n })
        });
        let view = Arc::new(PanelViewModel::new());
        let controller = Arc::new(NotificationPanelController::new(Arc::new(api), view.clone()));
        (controller, view)
    }

    #[tokio::test(start_paused = true)]
    async fn polls_immediately_then_on_each_tick() {
        let calls = Arc::new(AtomicU64::new(0));
        let (controller, view) = counting_controller(calls.clone());

        let handle = NotificationPoller::start(controller, Duration::from_secs(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(view.unread_count(), Some(3));

        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_poller_issues_no_more_fetches() {
        let calls = Arc::new(AtomicU64::new(0));
        let (controller, _view) = counting_controller(calls.clone());

        let handle = NotificationPoller::start(controller, Duration::from_secs(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.stop().await;

        let before = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), before);
    }

    /// 未读数请求永远不返回
    struct HangingApi;

    #[async_trait::async_trait]
    impl NotificationApi for HangingApi {
        async fn unread_count(&self) -> Result<NotificationSummary> {
            std::future::pending().await
        }

        async fn list_notifications(&self) -> Result<Vec<Notification>> {
            std::future::pending().await
        }

        async fn mark_all_as_read(&self) -> Result<MessageResponse> {
            std::future::pending().await
        }

        async fn mark_as_read(&self, _notification_id: i64) -> Result<MessageResponse> {
            std::future::pending().await
        }

        async fn approve_booking(&self, _booking_id: &str) -> Result<MessageResponse> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stop_does_not_wait_for_in_flight_fetch() {
        let view = Arc::new(PanelViewModel::new());
        let controller = Arc::new(NotificationPanelController::new(Arc::new(HangingApi), view));

        let handle = NotificationPoller::start(controller.clone(), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_millis(10)).await;

        let stopped = tokio::time::timeout(Duration::from_secs(1), handle.stop()).await;
        assert!(stopped.is_ok());
        assert_eq!(Arc::strong_count(&controller), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels_timer() {
        let calls = Arc::new(AtomicU64::new(0));
        let (controller, _view) = counting_controller(calls.clone());

        let handle = NotificationPoller::start(controller.clone(), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);
        tokio::task::yield_now().await;

        let before = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), before);
        // 任务退出后只剩测试持有的引用
        assert_eq!(Arc::strong_count(&controller), 1);
    }
}
