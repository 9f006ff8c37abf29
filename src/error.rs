use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// 会话令牌无法解析（段数错误、base64 无效、负载不是 JSON 对象）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedSessionError {
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),

    #[error("token payload is not valid base64url: {0}")]
    Base64(String),

    #[error("token payload is not a JSON object: {0}")]
    Json(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed session: {0}")]
    MalformedSession(#[from] MalformedSessionError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 弹窗提示使用的兜底文案
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

impl AppError {
    pub fn status(status: StatusCode, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    pub fn config(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }

    /// 面向用户的提示：优先使用服务端返回的消息，否则使用通用文案
    pub fn user_message(&self) -> String {
        match self {
            AppError::Status {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
