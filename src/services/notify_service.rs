//! 通知服务 - 业务能力层
//!
//! 只负责"把处理结果发到 webhook"能力，失败只上报不重试

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::NotifyError;

/// webhook 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub email_to: String,
    pub honor_score: u64,
    pub waste_type: String,
}

impl NotificationPayload {
    pub fn new(email_to: impl Into<String>, waste_type: impl Into<String>, honor_score: u64) -> Self {
        Self {
            email_to: email_to.into(),
            honor_score,
            waste_type: waste_type.into(),
        }
    }
}

/// 通知协作方
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}

/// 通知服务
pub struct NotifyService {
    client: reqwest::Client,
    webhook_url: String,
    timeout: Duration,
}

impl NotifyService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.notify_webhook_url.trim().to_string(),
            timeout: Duration::from_secs(config.notify_timeout_secs.max(1)),
        }
    }

    /// 200 / 201 视为成功
    pub fn is_success_status(status: u16) -> bool {
        matches!(status, 200 | 201)
    }
}

impl Notifier for NotifyService {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        if self.webhook_url.is_empty() {
            warn!("未配置 NOTIFY_WEBHOOK_URL，跳过通知");
            return Err(NotifyError::NotConfigured);
        }

        debug!("发送通知到 {}: {:?}", self.webhook_url, payload);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(NotifyError::Connection)?;

        let status = response.status().as_u16();
        if Self::is_success_status(status) {
            debug!("通知发送成功 (状态码: {})", status);
            Ok(())
        } else {
            warn!("通知发送失败 (状态码: {})", status);
            Err(NotifyError::BadStatus { status })
        }
    }
}
