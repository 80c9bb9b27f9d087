use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use pairly_bot::Transport;
use pairly_types::UserId;
use pairly_types::api::InlineButton;

use crate::telegram::{
    AnswerCallbackQuery, ApiResponse, GetUpdates, InlineKeyboardMarkup, SendMessage, SendPhoto, Update,
};

/// Headroom on top of the long-poll timeout before the HTTP request gives up.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Bot API client over HTTPS. Also the bot's outbound `Transport`.
pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_base}/bot{token}`
    endpoint: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + REQUEST_SLACK)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    /// Long-poll for updates with id >= `offset`.
    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: timeout.as_secs(),
                allowed_updates: ALLOWED_UPDATES,
            },
        )
        .await
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        trace!(method, "Bot API call");

        let resp: ApiResponse<R> = self
            .http
            .post(format!("{}/{}", self.endpoint, method))
            .json(body)
            .send()
            .await
            // The URL carries the bot token
            .map_err(|e| e.without_url())
            .with_context(|| format!("{} request failed", method))?
            .json()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("{} returned an unreadable body", method))?;

        if !resp.ok {
            return Err(anyhow!(
                "{} rejected: {}",
                method,
                resp.description.unwrap_or_else(|| "no description".into())
            ));
        }

        resp.result.ok_or_else(|| anyhow!("{} returned ok without a result", method))
    }
}

impl Transport for TelegramClient {
    async fn send_text(&self, chat_id: UserId, text: &str) -> Result<()> {
        let _: serde_json::Value = self.call("sendMessage", &SendMessage { chat_id, text }).await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: UserId,
        photo_id: &str,
        caption: &str,
        buttons: &[InlineButton],
    ) -> Result<()> {
        let body = SendPhoto {
            chat_id,
            photo: photo_id,
            caption,
            reply_markup: InlineKeyboardMarkup::stacked(buttons),
        };
        let _: serde_json::Value = self.call("sendPhoto", &body).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery {
                    callback_query_id: callback_id,
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "123:SECRETTOKEN";

    fn unreachable_client() -> TelegramClient {
        // Nothing listens on the discard port
        TelegramClient::new("http://127.0.0.1:9", TOKEN, Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn failed_poll_error_hides_token() {
        let err = unreachable_client()
            .get_updates(0, Duration::ZERO)
            .await
            .unwrap_err();

        let shown = format!("{:#}", err);
        assert!(shown.starts_with("getUpdates request failed"), "{shown}");
        assert!(!shown.contains("SECRETTOKEN"), "{shown}");
        assert!(!format!("{:?}", err).contains("SECRETTOKEN"));
    }

    #[tokio::test]
    async fn failed_send_error_hides_token() {
        let err = unreachable_client().send_text(1, "hi").await.unwrap_err();
        assert!(!format!("{:#}", err).contains("SECRETTOKEN"));
    }
}
