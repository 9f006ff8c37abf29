pub mod access;
pub mod api;
pub mod notification;
pub mod page;
pub mod poller;
pub mod session;

// 重新导出常用类型
pub use access::{AccessDecision, AccessGate, PageRequirement};
pub use api::{HttpApiClient, NotificationApi};
pub use notification::NotificationPanelController;
pub use page::{load_page, logout, LoadedPage, PageOutcome};
pub use poller::{NotificationPoller, PollingHandle};
pub use session::{decode_session, SessionReader};
