use std::future::Future;
use std::sync::Mutex;

use pairly_types::UserId;
use pairly_types::api::InlineButton;

/// Outbound side of the chat platform.
pub trait Transport: Send + Sync {
    fn send_text(&self, chat_id: UserId, text: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Photo with a caption and one inline button per row.
    fn send_photo(
        &self,
        chat_id: UserId,
        photo_id: &str,
        caption: &str,
        buttons: &[InlineButton],
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Acknowledge a button press so the client clears its spinner.
    fn answer_callback(&self, callback_id: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        chat_id: UserId,
        text: String,
    },
    Photo {
        chat_id: UserId,
        photo_id: String,
        caption: String,
        buttons: Vec<InlineButton>,
    },
    CallbackAnswer {
        callback_id: String,
    },
}

/// Transport that records everything instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Outbound>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Outbound> {
        self.sent.lock().map(|mut s| std::mem::take(&mut *s)).unwrap_or_default()
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Texts sent to `chat_id`, oldest first.
    pub fn texts_to(&self, chat_id: UserId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Text { chat_id: to, text } if to == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Photos sent to `chat_id`, oldest first.
    pub fn photos_to(&self, chat_id: UserId) -> Vec<Outbound> {
        self.sent()
            .into_iter()
            .filter(|o| matches!(o, Outbound::Photo { chat_id: to, .. } if *to == chat_id))
            .collect()
    }

    fn push(&self, out: Outbound) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(out);
        }
    }
}

impl Transport for RecordingTransport {
    async fn send_text(&self, chat_id: UserId, text: &str) -> anyhow::Result<()> {
        self.push(Outbound::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: UserId,
        photo_id: &str,
        caption: &str,
        buttons: &[InlineButton],
    ) -> anyhow::Result<()> {
        self.push(Outbound::Photo {
            chat_id,
            photo_id: photo_id.to_string(),
            caption: caption.to_string(),
            buttons: buttons.to_vec(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> anyhow::Result<()> {
        self.push(Outbound::CallbackAnswer {
            callback_id: callback_id.to_string(),
        });
        Ok(())
    }
}
