use std::sync::Arc;
use tracing::info;

use crate::{
    models::{
        session::Session,
        view::{Navigator, NotificationView},
    },
    services::{
        access::{AccessDecision, AccessGate, PageRequirement},
        api::NotificationApi,
        notification::NotificationPanelController,
        poller::{NotificationPoller, PollingHandle},
    },
    state::PageContext,
};

/// 已通过访问检查的页面
pub struct LoadedPage {
    pub session: Session,
    pub controller: Arc<NotificationPanelController>,
    pub poller: PollingHandle,
}

pub enum PageOutcome {
    /// 已跳转到指定页面
    Redirected(String),
    /// 公共页面、未登录：显示登录入口
    LoginRequired,
    Ready(LoadedPage),
}

impl PageOutcome {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            PageOutcome::Redirected(target) => Some(target.as_str()),
            _ => None,
        }
    }
}

/// 页面加载：读取会话 → 访问检查 → 启动通知轮询
///
/// 跳转发生在任何受保护请求之前。
pub fn load_page(
    ctx: &PageContext,
    requirement: PageRequirement,
    api: Arc<dyn NotificationApi>,
    view: Arc<dyn NotificationView>,
    navigator: &dyn Navigator,
) -> PageOutcome {
    let gate = AccessGate::new(&ctx.config);

    match gate.check_access(requirement, ctx.session.as_ref()) {
        AccessDecision::Denied { redirect_to } => {
            navigator.redirect(&redirect_to);
            PageOutcome::Redirected(redirect_to)
        }
        AccessDecision::Anonymous => PageOutcome::LoginRequired,
        AccessDecision::Permitted(session) => {
            info!("Page permitted for role {}", session.role);
            let controller = Arc::new(NotificationPanelController::new(api, view));
            let poller = NotificationPoller::start(controller.clone(), ctx.config.poll_interval());
            PageOutcome::Ready(LoadedPage {
                session,
                controller,
                poller,
            })
        }
    }
}

/// 退出登录：返回需要写入的 `Set-Cookie` 值，并跳转到登录页
pub fn logout(ctx: &PageContext, navigator: &dyn Navigator) -> String {
    let (cookie, target) = ctx.session_reader().logout_cookie();
    navigator.redirect(&target);
    info!("Session cleared, redirecting to {}", target);
    cookie
}
