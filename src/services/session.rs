use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::MalformedSessionError,
    models::session::{Role, Session, SessionClaims},
};

/// 清除会话 Cookie 时使用的过期时间
const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// 从 Cookie 中读取会话令牌并解析角色
///
/// 这里不做签名校验，结果只用于界面展示；服务端会对每个受保护请求重新校验令牌。
#[derive(Debug, Clone)]
pub struct SessionReader {
    cookie_name: String,
    login_page: String,
    landing_page: String,
    host_dashboard_page: String,
}

impl SessionReader {
    pub fn new(config: &Config) -> Self {
        Self {
            cookie_name: config.session_cookie_name.clone(),
            login_page: config.login_page.clone(),
            landing_page: config.landing_page.clone(),
            host_dashboard_page: config.host_dashboard_page.clone(),
        }
    }

    /// 从 `Cookie` 头格式的字符串中取出会话令牌，空值视为不存在
    pub fn get_session_token(&self, cookie_header: &str) -> Option<String> {
        cookie_header
            .split(';')
            .filter_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key.trim() == self.cookie_name).then(|| value.trim())
            })
            .find(|value| !value.is_empty())
            .map(|value| {
                urlencoding::decode(value)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| value.to_string())
            })
    }

    /// 读取并解析当前会话；令牌格式错误与没有会话同等对待
    pub fn current_session(&self, cookie_header: &str) -> Option<Session> {
        let token = self.get_session_token(cookie_header)?;

        match decode_session(&token) {
            Ok(session) => {
                debug!("Session decoded with role: {}", session.role);
                Some(session)
            }
            Err(e) => {
                warn!("Ignoring malformed session token: {}", e);
                None
            }
        }
    }

    /// 退出登录：返回清除 Cookie 的 `Set-Cookie` 值和跳转目标
    pub fn logout_cookie(&self) -> (String, String) {
        (
            format!("{}=; path=/; expires={}", self.cookie_name, EPOCH_EXPIRY),
            self.login_page.clone(),
        )
    }

    /// 登录后的落地页：host 进入控制台，其他人回到首页
    pub fn landing_page_for(&self, role: Role) -> &str {
        match role {
            Role::Host => &self.host_dashboard_page,
            Role::User | Role::Guest => &self.landing_page,
        }
    }
}

/// 解析三段式令牌的中间段（base64url 编码的 JSON）
pub fn decode_session(token: &str) -> Result<Session, MalformedSessionError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(MalformedSessionError::SegmentCount(segments.len()));
    }

    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| MalformedSessionError::Base64(e.to_string()))?;

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| MalformedSessionError::Json(e.to_string()))?;
    if !value.is_object() {
        return Err(MalformedSessionError::Json(
            "payload is not an object".to_string(),
        ));
    }

    let claims: SessionClaims =
        serde_json::from_value(value).map_err(|e| MalformedSessionError::Json(e.to_string()))?;

    Ok(Session::from_claims(token.to_string(), claims))
}
