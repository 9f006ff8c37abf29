use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::Config,
    error::{AppError, Result},
    models::{
        notification::{Notification, NotificationListResponse, NotificationSummary},
        response::{ErrorResponse, MessageResponse},
        session::Session,
    },
};

/// 通知面板依赖的后端接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationApi: Send + Sync {
    async fn unread_count(&self) -> Result<NotificationSummary>;

    async fn list_notifications(&self) -> Result<Vec<Notification>>;

    async fn mark_all_as_read(&self) -> Result<MessageResponse>;

    async fn mark_as_read(&self, notification_id: i64) -> Result<MessageResponse>;

    async fn approve_booking(&self, booking_id: &str) -> Result<MessageResponse>;
}

/// 基于 reqwest 的实现，统一使用 `{api_prefix}/notifications/*` 路径
#[derive(Clone)]
pub struct HttpApiClient {
    http_client: Client,
    base_url: Url,
    api_prefix: String,
    token: Option<String>,
}

impl HttpApiClient {
    pub fn new(config: &Config, session: Option<&Session>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(&config.api_base_url)?;

        Ok(Self {
            http_client,
            base_url,
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
            token: session.map(|s| s.bearer_token().to_string()),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn notifications_endpoint(&self, suffix: &str) -> Result<Url> {
        self.endpoint(&format!("{}/notifications/{}", self.api_prefix, suffix))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API returned error status: {}", status);
            return Err(AppError::status(status, ErrorResponse::best_message(&body)));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url.path());
        self.send(self.http_client.get(url)).await
    }

    async fn post_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("POST {}", url.path());
        self.send(
            self.http_client
                .post(url)
                .header(CONTENT_TYPE, "application/json"),
        )
        .await
    }
}

#[async_trait]
impl NotificationApi for HttpApiClient {
    async fn unread_count(&self) -> Result<NotificationSummary> {
        let url = self.notifications_endpoint("unread_count")?;
        self.get_json(url).await
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        let url = self.notifications_endpoint("")?;
        let response: NotificationListResponse = self.get_json(url).await?;
        Ok(response.into_notifications())
    }

    async fn mark_all_as_read(&self) -> Result<MessageResponse> {
        let url = self.notifications_endpoint("mark_all_as_read")?;
        self.post_json(url).await
    }

    async fn mark_as_read(&self, notification_id: i64) -> Result<MessageResponse> {
        let url = self.notifications_endpoint(&format!("{}/mark_as_read", notification_id))?;
        self.post_json(url).await
    }

    async fn approve_booking(&self, booking_id: &str) -> Result<MessageResponse> {
        let url = self.endpoint(&format!(
            "/host/bookings/{}/approve",
            urlencoding::encode(booking_id)
        ))?;
        self.post_json(url).await
    }
}
