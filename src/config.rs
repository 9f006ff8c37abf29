use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub log_level: String,

    // Backend API
    pub api_base_url: String,
    pub api_prefix: String,
    pub http_timeout_secs: u64,

    // Session
    pub session_cookie_name: String,

    // Page paths
    pub landing_page: String,
    pub login_page: String,
    pub host_dashboard_page: String,

    // Notifications
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "hbnb_portal=debug".to_string(),
            api_base_url: "http://localhost:5000".to_string(),
            api_prefix: "/api/v1".to_string(),
            http_timeout_secs: 30,
            session_cookie_name: "token".to_string(),
            landing_page: "index.html".to_string(),
            login_page: "login.html".to_string(),
            host_dashboard_page: "host_dashboard.html".to_string(),
            poll_interval_secs: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let config = Config {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.http_timeout_secs.to_string())
                .parse()?,

            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session_cookie_name),

            landing_page: env::var("LANDING_PAGE").unwrap_or(defaults.landing_page),
            login_page: env::var("LOGIN_PAGE").unwrap_or(defaults.login_page),
            host_dashboard_page: env::var("HOST_DASHBOARD_PAGE")
                .unwrap_or(defaults.host_dashboard_page),

            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| defaults.poll_interval_secs.to_string())
                .parse()?,
        };

        if config.poll_interval_secs == 0 {
            anyhow::bail!("POLL_INTERVAL_SECS must be greater than zero");
        }

        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
