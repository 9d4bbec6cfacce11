use crate::webhook::data_types::OutboundMessage;
use crate::webhook::error::SendError;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

type SendResult = std::result::Result<(), SendError>;

/// Outbound side of the bot: the only calls it makes to the Bot API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: String) -> SendResult;
    async fn set_webhook(&self, url: &str, secret: Option<&str>) -> SendResult;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct Telegram {
    api_url: String,
    client: reqwest::Client,
}

impl Telegram {
    /// `timeout` bounds each call, so a stalled API cannot hold the webhook post open.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, SendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            client,
        })
    }

    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> SendResult {
        let url = format!("{}/{}", self.api_url, method);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Telegram puts the reason in `description` for both 4xx and `ok: false`
        let parsed = serde_json::from_str::<ApiResponse>(&text).ok();
        match parsed {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => {
                debug!("[{method}] ok");
                Ok(())
            }
            Some(ApiResponse { description, .. }) => Err(SendError::Api {
                status,
                description: description.unwrap_or(text),
            }),
            None if status.is_success() => Ok(()),
            None => Err(SendError::Api {
                status,
                description: text,
            }),
        }
    }
}

#[async_trait]
impl Transport for Telegram {
    async fn send_message(&self, chat_id: i64, text: String) -> SendResult {
        let msg = OutboundMessage { chat_id, text };
        self.call("sendMessage", &msg).await
    }

    async fn set_webhook(&self, url: &str, secret: Option<&str>) -> SendResult {
        let mut body = json!({ "url": url });
        if let Some(s) = secret {
            body["secret_token"] = serde_json::Value::String(s.to_string());
        }
        self.call("setWebhook", &body).await
    }
}

#[cfg(test)]
pub use mock::MockTransport;
