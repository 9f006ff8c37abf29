use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hbnb_portal::{
    models::{
        notification::{Notification, PanelState},
        view::{Navigator, NotificationView},
    },
    services::{load_page, HttpApiClient, PageOutcome, PageRequirement},
    utils::markup,
    Config, PageContext,
};

/// 把渲染结果写进日志的视图
struct ConsoleView;

impl NotificationView for ConsoleView {
    fn is_attached(&self) -> bool {
        true
    }

    fn set_unread_count(&self, count: u64) {
        info!(unread_count = count, "badge updated");
    }

    fn set_panel_state(&self, state: PanelState) {
        info!(?state, "notification panel toggled");
    }

    fn render_notifications(&self, items: &[Notification]) {
        info!("{}", markup::render_notification_items(items));
    }

    fn render_placeholder(&self, text: &str) {
        info!("{}", markup::render_placeholder(text));
    }

    fn alert(&self, message: &str) {
        warn!(alert = message);
    }
}

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, path: &str) {
        info!("redirect -> {}", path);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)?;
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Starting HBnB portal client against {}", config.api_base_url);

    let cookie_header = std::env::var("SESSION_COOKIE").unwrap_or_default();
    let requirement = match std::env::var("PAGE").as_deref() {
        Ok("host_dashboard") => PageRequirement::HostOnly,
        _ => PageRequirement::Public,
    };

    let ctx = PageContext::from_cookie_header(config, &cookie_header);
    let api = Arc::new(HttpApiClient::new(&ctx.config, ctx.session.as_ref())?);

    let page = match load_page(&ctx, requirement, api, Arc::new(ConsoleView), &ConsoleNavigator) {
        PageOutcome::Ready(page) => page,
        PageOutcome::Redirected(target) => {
            info!("Access denied, left page for {}", target);
            return Ok(());
        }
        PageOutcome::LoginRequired => {
            info!("No session, showing login link");
            return Ok(());
        }
    };

    if std::env::var("OPEN_PANEL").is_ok() {
        page.controller.toggle_panel().await;
    }

    tokio::signal::ctrl_c().await?;
    page.poller.stop().await;
    info!("Shutting down");

    Ok(())
}
