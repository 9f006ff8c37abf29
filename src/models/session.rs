use serde::{Deserialize, Serialize};
use std::fmt;

/// 调用方角色，来自令牌负载中的 `role` 声明
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    User,
    Host,
}

impl Role {
    /// 只接受与签发值完全一致的角色；未知或缺失的一律视为 guest
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some("host") => Role::Host,
            Some("user") => Role::User,
            _ => Role::Guest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Host => "host",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 令牌负载中客户端关心的声明
///
/// 声明的类型不做约束，类型不符时按缺失处理，不会让整个令牌失效。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    #[serde(default)]
    pub role: Option<serde_json::Value>,
    #[serde(default)]
    pub is_admin: Option<serde_json::Value>,
}

/// 客户端持有的会话
///
/// 过期时间从不在客户端校验：服务端拒绝受保护请求之前，过期的会话看起来仍然有效。
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub subject: Option<String>,
    pub is_admin: bool,
}

impl Session {
    pub fn from_claims(token: String, claims: SessionClaims) -> Self {
        let subject = claims.sub.and_then(|sub| match sub {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Self {
            token,
            role: Role::from_claim(claims.role.as_ref().and_then(serde_json::Value::as_str)),
            subject,
            is_admin: matches!(claims.is_admin, Some(serde_json::Value::Bool(true))),
        }
    }

    pub fn is_host(&self) -> bool {
        self.role == Role::Host
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

// 令牌不进日志
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("subject", &self.subject)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_roles_map_to_guest() {
        assert_eq!(Role::from_claim(Some("host")), Role::Host);
        assert_eq!(Role::from_claim(Some(" HOST ")), Role::Guest);
        assert_eq!(Role::from_claim(Some("Host")), Role::Guest);
        assert_eq!(Role::from_claim(Some("user")), Role::User);
        assert_eq!(Role::from_claim(Some("admin")), Role::Guest);
        assert_eq!(Role::from_claim(None), Role::Guest);
    }

    #[test]
    fn numeric_subject_is_stringified() {
        let claims: SessionClaims =
            serde_json::from_value(json!({ "sub": 42, "role": "user" })).unwrap();
        let session = Session::from_claims("t".into(), claims);
        assert_eq!(session.subject.as_deref(), Some("42"));
        assert_eq!(session.role, Role::User);
        assert!(!session.is_admin);
    }

    #[test]
    fn mistyped_claims_are_treated_as_absent() {
        let claims: SessionClaims = serde_json::from_value(json!({
            "sub": [1],
            "role": 5,
            "is_admin": "yes"
        }))
        .unwrap();
        let session = Session::from_claims("t".into(), claims);
        assert_eq!(session.role, Role::Guest);
        assert_eq!(session.subject, None);
        assert!(!session.is_admin);
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::from_claims("secret-token".into(), SessionClaims::default());
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
