use tracing::{debug, info, warn};

use pairly_types::UserId;
use pairly_types::api::CallbackAction;
use pairly_types::models::{Decision, OnboardingState};

use crate::dispatcher::{Bot, FINISH_PROFILE};
use crate::error::BotError;
use crate::transport::Transport;

pub const MATCHED: &str = "💌 It's a match! Send a message to start chatting.";
pub const SEARCHING: &str = "Searching for another match...";

pub fn liked_back(name: &str) -> String {
    format!("💌 {} liked you back! Chat now.", name)
}

impl<T: Transport> Bot<T> {
    /// Like/dislike button press: record, notify on a mutual like, then
    /// move straight on to the next candidate.
    pub(crate) async fn on_callback(&self, chat_id: UserId, callback_id: &str, data: &str) -> Result<(), BotError> {
        if let Err(e) = self.transport.answer_callback(callback_id).await {
            warn!(chat_id, "Failed to answer callback: {:#}", e);
        }

        let action = CallbackAction::parse(data).ok_or_else(|| BotError::MalformedCallback(data.to_string()))?;
        if action.target == chat_id || !self.db.user_exists(action.target)? {
            return Err(BotError::MalformedCallback(data.to_string()));
        }

        if self.onboarding_state(chat_id)? != Some(OnboardingState::Onboarded) {
            return self.say(chat_id, FINISH_PROFILE).await;
        }

        self.record_decision(chat_id, action.target, action.decision).await?;

        self.say(chat_id, SEARCHING).await?;
        self.find_match(chat_id).await
    }

    /// Store the decision and, for a like that completes a mutual pair,
    /// notify both sides. Returns whether this call formed a mutual pair;
    /// repeating a decision the pair already has changes nothing.
    pub async fn record_decision(&self, from: UserId, to: UserId, decision: Decision) -> Result<bool, BotError> {
        if self.db.record_decision(from, to, decision)?.is_none() {
            debug!(from, to, "Decision unchanged");
            return Ok(false);
        }

        if decision != Decision::Liked || !self.db.check_mutual(from, to)? {
            return Ok(false);
        }

        info!(from, to, "Mutual match");
        let liker = match self.db.get_user(from)? {
            Some(row) => row.to_profile()?,
            None => return Ok(true),
        };

        self.say(from, MATCHED).await?;
        self.say(to, &liked_back(liker.display_name())).await?;
        Ok(true)
    }
}
