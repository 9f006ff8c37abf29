use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Read,
    #[default]
    Unread,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub status: NotificationStatus,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NotificationSummary {
    pub unread_count: u64,
}

/// 通知列表响应
///
/// 兼容两种形态：`{"notifications": [...]}` 以及直接返回的数组。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NotificationListResponse {
    Wrapped { notifications: Vec<Notification> },
    Bare(Vec<Notification>),
}

impl NotificationListResponse {
    pub fn into_notifications(self) -> Vec<Notification> {
        match self {
            NotificationListResponse::Wrapped { notifications } => notifications,
            NotificationListResponse::Bare(notifications) => notifications,
        }
    }
}

/// 通知面板的可见状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == PanelState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_accepts_wrapped_and_bare_shapes() {
        let wrapped: NotificationListResponse = serde_json::from_value(json!({
            "notifications": [
                { "message": "Booking confirmed", "timestamp": "2024-05-01 10:00:00", "status": "unread" }
            ]
        }))
        .unwrap();
        assert_eq!(wrapped.into_notifications().len(), 1);

        let bare: NotificationListResponse = serde_json::from_value(json!([
            { "id": 3, "message": "a", "timestamp": "2024-05-01 10:00:00", "status": "read" },
            { "id": 2, "message": "b", "timestamp": "2024-04-30 09:00:00", "status": "unread" }
        ]))
        .unwrap();
        let items = bare.into_notifications();
        assert_eq!(items[0].id, Some(3));
        assert_eq!(items[0].status, NotificationStatus::Read);
        assert!(items[1].is_unread());
    }

    #[test]
    fn panel_toggles_between_two_states() {
        let state = PanelState::default();
        assert_eq!(state, PanelState::Closed);
        assert!(state.toggled().is_open());
        assert_eq!(state.toggled().toggled(), PanelState::Closed);
    }
}
