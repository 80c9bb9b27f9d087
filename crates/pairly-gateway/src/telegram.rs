//! Bot API wire types, reduced to the fields the bot reads or writes.

use serde::{Deserialize, Serialize};

use pairly_types::api::InlineButton;
use pairly_types::events::InboundEvent;

/// `{"ok": ..., "result": ..., "description": ...}` envelope on every reply.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
    pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
}

impl Update {
    /// Translate into the bot's event shape. Updates of other kinds
    /// (edited messages, channel posts...) yield `None`.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(query) = self.callback_query {
            let chat_id = query.message.as_ref().map_or(query.from.id, |m| m.chat.id);
            return Some(InboundEvent::Callback {
                chat_id,
                callback_id: query.id,
                data: query.data.unwrap_or_default(),
            });
        }

        let message = self.message?;
        let chat_id = message.chat.id;

        if let Some(text) = message.text {
            return Some(InboundEvent::from_text(chat_id, text));
        }

        match message.photo.and_then(|sizes| sizes.into_iter().next()) {
            Some(size) => Some(InboundEvent::Photo {
                chat_id,
                file_id: size.file_id,
            }),
            None => Some(InboundEvent::Unsupported { chat_id }),
        }
    }
}

// -- Outbound bodies --

#[derive(Debug, Serialize)]
pub struct GetUpdates<'a> {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SendPhoto<'a> {
    pub chat_id: i64,
    pub photo: &'a str,
    pub caption: &'a str,
    pub reply_markup: InlineKeyboardMarkup<'a>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup<'a> {
    pub inline_keyboard: Vec<Vec<&'a InlineButton>>,
}

impl<'a> InlineKeyboardMarkup<'a> {
    /// One button per row.
    pub fn stacked(buttons: &'a [InlineButton]) -> Self {
        Self {
            inline_keyboard: buttons.iter().map(|b| vec![b]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairly_types::api::decision_buttons;
    use pairly_types::events::Command;

    fn parse(json: &str) -> Option<InboundEvent> {
        serde_json::from_str::<Update>(json).unwrap().into_event()
    }

    #[test]
    fn text_and_commands() {
        assert_eq!(
            parse(r#"{"update_id":1,"message":{"message_id":5,"chat":{"id":42,"type":"private"},"text":"Alice"}}"#),
            Some(InboundEvent::Text { chat_id: 42, text: "Alice".into() })
        );
        assert_eq!(
            parse(r#"{"update_id":2,"message":{"chat":{"id":42},"text":"/find"}}"#),
            Some(InboundEvent::Command { chat_id: 42, command: Command::Find })
        );
    }

    #[test]
    fn photo_uses_first_size() {
        let json = r#"{"update_id":3,"message":{"chat":{"id":42},"photo":[
            {"file_id":"small","width":90,"height":90},
            {"file_id":"large","width":800,"height":800}]}}"#;
        assert_eq!(
            parse(json),
            Some(InboundEvent::Photo { chat_id: 42, file_id: "small".into() })
        );
    }

    #[test]
    fn callback_uses_message_chat() {
        let json = r#"{"update_id":4,"callback_query":{"id":"cb1","from":{"id":7,"first_name":"A"},
            "message":{"chat":{"id":42}},"data":"like_9"}}"#;
        assert_eq!(
            parse(json),
            Some(InboundEvent::Callback { chat_id: 42, callback_id: "cb1".into(), data: "like_9".into() })
        );
    }

    #[test]
    fn stickers_and_edits() {
        assert_eq!(
            parse(r#"{"update_id":5,"message":{"chat":{"id":42},"sticker":{"file_id":"s"}}}"#),
            Some(InboundEvent::Unsupported { chat_id: 42 })
        );
        assert_eq!(parse(r#"{"update_id":6,"edited_message":{"chat":{"id":42},"text":"x"}}"#), None);
    }

    #[test]
    fn keyboard_is_one_button_per_row() {
        let buttons = decision_buttons(9);
        let json = serde_json::to_value(InlineKeyboardMarkup::stacked(&buttons)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inline_keyboard": [
                    [{ "text": "❤️ Like", "callback_data": "like_9" }],
                    [{ "text": "👎 Dislike", "callback_data": "dislike_9" }],
                ]
            })
        );
    }
}
