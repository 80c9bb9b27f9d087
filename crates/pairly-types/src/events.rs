use crate::UserId;

/// Bot commands the dispatcher understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Find,
    /// Any other `/word`. Ignored, never relayed.
    Unknown(String),
}

impl Command {
    /// Parse a leading `/command`, tolerating the `@botname` suffix group
    /// chats append. Returns `None` for text that is not a command; a bare
    /// `/` or `/ text` is an unnamed `Unknown` command.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim_start().strip_prefix('/')?;
        let word = rest.split(char::is_whitespace).next().unwrap_or("");
        let name = word.split('@').next().unwrap_or(word);
        Some(match name {
            "start" => Self::Start,
            "find" => Self::Find,
            other => Self::Unknown(other.to_string()),
        })
    }
}

/// Events delivered by the platform transport, already reduced to the
/// shapes the bot routes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command {
        chat_id: UserId,
        command: Command,
    },

    Text {
        chat_id: UserId,
        text: String,
    },

    Photo {
        chat_id: UserId,
        file_id: String,
    },

    /// Inline button press.
    Callback {
        chat_id: UserId,
        callback_id: String,
        data: String,
    },

    /// A message with no text or photo (sticker, voice, location...).
    Unsupported { chat_id: UserId },
}

impl InboundEvent {
    /// Classify a text message as a command or plain text.
    pub fn from_text(chat_id: UserId, text: impl Into<String>) -> Self {
        let text = text.into();
        match Command::parse(&text) {
            Some(command) => Self::Command { chat_id, command },
            None => Self::Text { chat_id, text },
        }
    }

    pub fn chat_id(&self) -> UserId {
        match self {
            Self::Command { chat_id, .. }
            | Self::Text { chat_id, .. }
            | Self::Photo { chat_id, .. }
            | Self::Callback { chat_id, .. }
            | Self::Unsupported { chat_id } => *chat_id,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Command { .. } => "command",
            Self::Text { .. } => "text",
            Self::Photo { .. } => "photo",
            Self::Callback { .. } => "callback",
            Self::Unsupported { .. } => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/find@PairlyBot"), Some(Command::Find));
        assert_eq!(Command::parse("  /find now"), Some(Command::Find));
        assert_eq!(
            Command::parse("/help"),
            Some(Command::Unknown("help".into()))
        );
        assert_eq!(Command::parse("hello /start"), None);
    }

    #[test]
    fn leading_slash_is_always_a_command() {
        assert_eq!(Command::parse("/"), Some(Command::Unknown(String::new())));
        assert_eq!(Command::parse("/ hi"), Some(Command::Unknown(String::new())));
        assert_eq!(InboundEvent::from_text(5, " / hi").kind(), "command");
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(
            InboundEvent::from_text(5, "Alice"),
            InboundEvent::Text {
                chat_id: 5,
                text: "Alice".into()
            }
        );
        assert_eq!(InboundEvent::from_text(5, "/start").kind(), "command");
    }
}
