//! Profile setup: `/start`, then name, photo and bio, one step per message.
//!
//! The current step lives in `users.onboarding_state`. Each step is a single
//! guarded update, so a step fires at most once and a message of the wrong
//! shape leaves the user where they were.

use tracing::{debug, info};

use pairly_types::UserId;
use pairly_types::events::InboundEvent;
use pairly_types::models::OnboardingState;

use crate::dispatcher::Bot;
use crate::error::BotError;
use crate::transport::Transport;

pub const WELCOME: &str = "👋 Welcome! Send me your name to start.";
pub const ASK_PHOTO: &str = "📸 Now send a photo of yourself.";
pub const ASK_BIO: &str = "📝 Write a short bio about yourself.";
pub const PROFILE_COMPLETE: &str = "✅ Profile complete! Use /find to start matching.";

pub const NEED_NAME: &str = "✍️ Please send your name as a text message.";
pub const NEED_PHOTO: &str = "📸 Please send a photo to continue.";
pub const NEED_BIO: &str = "✍️ Please send your bio as a text message.";

/// What a message means for the step the user is on.
#[derive(Debug, PartialEq, Eq)]
pub enum StepInput<'a> {
    /// Store this value and advance.
    Accept(&'a str),
    /// Wrong shape; ask again without advancing.
    Reprompt(&'static str),
}

/// Classify `event` against `step`. Name and bio take non-blank text,
/// the photo step takes a photo.
pub fn classify(step: OnboardingState, event: &InboundEvent) -> StepInput<'_> {
    match (step, event) {
        (OnboardingState::AwaitingName, InboundEvent::Text { text, .. }) if !text.trim().is_empty() => {
            StepInput::Accept(text.as_str())
        }
        (OnboardingState::AwaitingName, _) => StepInput::Reprompt(NEED_NAME),
        (OnboardingState::AwaitingPhoto, InboundEvent::Photo { file_id, .. }) => StepInput::Accept(file_id.as_str()),
        (OnboardingState::AwaitingPhoto, _) => StepInput::Reprompt(NEED_PHOTO),
        (OnboardingState::AwaitingBio, InboundEvent::Text { text, .. }) if !text.trim().is_empty() => {
            StepInput::Accept(text.as_str())
        }
        (OnboardingState::AwaitingBio, _) => StepInput::Reprompt(NEED_BIO),
        // Onboarded users never reach onboarding; nothing to ask for
        (OnboardingState::Onboarded, _) => StepInput::Reprompt(PROFILE_COMPLETE),
    }
}

/// Prompt sent after entering `state`.
pub fn prompt_for(state: OnboardingState) -> &'static str {
    match state {
        OnboardingState::AwaitingName => WELCOME,
        OnboardingState::AwaitingPhoto => ASK_PHOTO,
        OnboardingState::AwaitingBio => ASK_BIO,
        OnboardingState::Onboarded => PROFILE_COMPLETE,
    }
}

impl<T: Transport> Bot<T> {
    /// Create the profile if needed and (re)start at the name step.
    pub async fn start_onboarding(&self, chat_id: UserId) -> Result<(), BotError> {
        self.db.start_onboarding(chat_id)?;
        info!(chat_id, "Onboarding started");
        self.say(chat_id, WELCOME).await
    }

    pub(crate) async fn advance_onboarding(
        &self,
        chat_id: UserId,
        step: OnboardingState,
        event: &InboundEvent,
    ) -> Result<(), BotError> {
        let value = match classify(step, event) {
            StepInput::Accept(value) => value,
            StepInput::Reprompt(prompt) => {
                debug!(chat_id, step = step.as_str(), kind = event.kind(), "Unexpected input, re-prompting");
                return self.say(chat_id, prompt).await;
            }
        };

        if !self.db.complete_step(chat_id, step, value)? {
            debug!(chat_id, step = step.as_str(), "Step already taken, skipping");
            return Ok(());
        }

        let Some(next) = step.next() else {
            return Ok(());
        };
        if next == OnboardingState::Onboarded {
            info!(chat_id, "Profile complete");
        }
        self.say(chat_id, prompt_for(next)).await
    }
}
