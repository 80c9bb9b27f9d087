use serde::Serialize;

use crate::UserId;
use crate::models::Decision;

// -- Inline keyboard --

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

/// One row per button, like/dislike on a candidate card.
pub fn decision_buttons(target: UserId) -> Vec<InlineButton> {
    vec![
        InlineButton {
            text: "❤️ Like".into(),
            callback_data: CallbackAction::new(Decision::Liked, target).encode(),
        },
        InlineButton {
            text: "👎 Dislike".into(),
            callback_data: CallbackAction::new(Decision::Rejected, target).encode(),
        },
    ]
}

// -- Callback payloads --

/// Decoded button payload: `like_<user id>` or `dislike_<user id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackAction {
    pub decision: Decision,
    pub target: UserId,
}

impl CallbackAction {
    pub fn new(decision: Decision, target: UserId) -> Self {
        Self { decision, target }
    }

    pub fn encode(&self) -> String {
        let verb = match self.decision {
            Decision::Liked => "like",
            Decision::Rejected => "dislike",
        };
        format!("{}_{}", verb, self.target)
    }

    /// Returns `None` for anything that is not exactly `verb_id`.
    pub fn parse(data: &str) -> Option<Self> {
        let (verb, id) = data.split_once('_')?;
        let decision = match verb {
            "like" => Decision::Liked,
            "dislike" => Decision::Rejected,
            _ => return None,
        };
        let target = id.parse::<UserId>().ok()?;
        Some(Self { decision, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_payloads() {
        assert_eq!(
            CallbackAction::parse("like_42"),
            Some(CallbackAction::new(Decision::Liked, 42))
        );
        assert_eq!(
            CallbackAction::parse("dislike_-1001"),
            Some(CallbackAction::new(Decision::Rejected, -1001))
        );
    }

    #[test]
    fn rejects_malformed_payloads() {
        for data in ["", "like", "like_", "love_42", "like_abc", "like_42_1", "_42"] {
            assert_eq!(CallbackAction::parse(data), None, "{data:?}");
        }
    }

    #[test]
    fn buttons_carry_encoded_actions() {
        let buttons = decision_buttons(9);
        assert_eq!(buttons[0].callback_data, "like_9");
        assert_eq!(buttons[1].callback_data, "dislike_9");
    }
}
