use serde::{Deserialize, Serialize};

/// 状态变更类接口的响应，例如 `{"message": "All notifications marked as read."}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// 错误响应格式
///
/// 后端有时返回 `{"error": "..."}`，有时返回 `{"message": "..."}`。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// 从任意响应体中尽量提取一条可读消息
    pub fn best_message(body: &str) -> Option<String> {
        let parsed: ErrorResponse = serde_json::from_str(body).ok()?;
        parsed
            .error
            .or(parsed.message)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_message_prefers_error_field() {
        let body = r#"{"error": "Unauthorized", "message": "ignored"}"#;
        assert_eq!(ErrorResponse::best_message(body).as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn best_message_handles_non_json_bodies() {
        assert_eq!(ErrorResponse::best_message("<html>502</html>"), None);
        assert_eq!(ErrorResponse::best_message(r#"{"message": ""}"#), None);
    }

    #[test]
    fn message_or_uses_fallback() {
        let empty = MessageResponse::default();
        assert_eq!(empty.message_or("Marked all as read."), "Marked all as read.");

        let filled = MessageResponse {
            message: Some("Booking approved".into()),
        };
        assert_eq!(filled.message_or("x"), "Booking approved");
    }
}
