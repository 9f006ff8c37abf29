use crate::{config::Config, models::session::Session, services::session::SessionReader};

/// 页面级上下文
/// 显式传入各组件入口，取代全局 Cookie 读取
#[derive(Clone, Debug)]
pub struct PageContext {
    /// 应用配置
    pub config: Config,

    /// 当前会话，没有或无法解析时为 None
    pub session: Option<Session>,
}

impl PageContext {
    pub fn new(config: Config, session: Option<Session>) -> Self {
        Self { config, session }
    }

    /// 从 `Cookie` 头构建上下文
    pub fn from_cookie_header(config: Config, cookie_header: &str) -> Self {
        let session = SessionReader::new(&config).current_session(cookie_header);
        Self { config, session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_reader(&self) -> SessionReader {
        SessionReader::new(&self.config)
    }
}
