use tracing::{debug, info};

use crate::{
    config::Config,
    models::session::{Role, Session},
};

/// 页面的角色要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequirement {
    Public,
    HostOnly,
}

/// 页面加载时的访问判定
///
/// `Denied` 是正常的控制流分支，不是错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// 可以加载个性化内容
    Permitted(Session),
    /// 公共页面且没有会话：显示登录入口
    Anonymous,
    /// 需要跳转
    Denied { redirect_to: String },
}

impl AccessDecision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, AccessDecision::Permitted(_))
    }
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    landing_page: String,
}

impl AccessGate {
    pub fn new(config: &Config) -> Self {
        Self {
            landing_page: config.landing_page.clone(),
        }
    }

    pub fn check_access(
        &self,
        requirement: PageRequirement,
        session: Option<&Session>,
    ) -> AccessDecision {
        match (requirement, session) {
            (PageRequirement::HostOnly, Some(session)) if session.role == Role::Host => {
                AccessDecision::Permitted(session.clone())
            }
            (PageRequirement::HostOnly, session) => {
                info!(
                    "Host-only page denied for role {}",
                    session.map(|s| s.role).unwrap_or_default()
                );
                AccessDecision::Denied {
                    redirect_to: self.landing_page.clone(),
                }
            }
            (PageRequirement::Public, Some(session)) => AccessDecision::Permitted(session.clone()),
            (PageRequirement::Public, None) => {
                debug!("No session on public page, showing login link");
                AccessDecision::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionClaims;

    fn session(role: Option<&str>) -> Session {
        Session::from_claims(
            "h.p.s".into(),
            SessionClaims {
                role: role.map(|r| serde_json::Value::String(r.to_string())),
                ..SessionClaims::default()
            },
        )
    }

    fn gate() -> AccessGate {
        AccessGate::new(&Config::default())
    }

    #[test]
    fn host_page_requires_host_role() {
        let host = session(Some("host"));
        assert_eq!(
            gate().check_access(PageRequirement::HostOnly, Some(&host)),
            AccessDecision::Permitted(host)
        );

        for role in [Some("user"), Some("guest"), None] {
            let s = session(role);
            assert_eq!(
                gate().check_access(PageRequirement::HostOnly, Some(&s)),
                AccessDecision::Denied {
                    redirect_to: "index.html".into()
                }
            );
        }
    }

    #[test]
    fn host_page_without_session_is_denied() {
        let decision = gate().check_access(PageRequirement::HostOnly, None);
        assert!(!decision.is_permitted());
        assert_eq!(
            decision,
            AccessDecision::Denied {
                redirect_to: "index.html".into()
            }
        );
    }

    #[test]
    fn public_page_shows_login_without_session() {
        assert_eq!(
            gate().check_access(PageRequirement::Public, None),
            AccessDecision::Anonymous
        );
        let user = session(Some("user"));
        assert!(gate()
            .check_access(PageRequirement::Public, Some(&user))
            .is_permitted());
    }
}
