pub mod notification;
pub mod response;
pub mod session;
pub mod view;

pub use notification::{
    Notification, NotificationListResponse, NotificationStatus, NotificationSummary, PanelState,
};
pub use response::{ErrorResponse, MessageResponse};
pub use session::{Role, Session, SessionClaims};
pub use view::{Navigator, NotificationView, PanelContent, PanelViewModel, RecordingNavigator};
