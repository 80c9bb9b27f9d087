use tracing::{debug, error, warn};

use pairly_db::Database;
use pairly_types::UserId;
use pairly_types::events::{Command, InboundEvent};
use pairly_types::models::OnboardingState;

use crate::error::BotError;
use crate::transport::Transport;

pub const NO_MATCHES: &str = "❌ No matches found. Try later!";
pub const FINISH_PROFILE: &str = "Finish your profile first with /start.";
pub const GENERIC_FAILURE: &str = "⚠️ Something went wrong, please try again.";

/// Routes inbound events to onboarding, matching, decisions or relay.
///
/// Events are expected one at a time; each one runs to completion,
/// including its writes, before the caller hands over the next.
pub struct Bot<T> {
    pub(crate) db: Database,
    pub(crate) transport: T,
}

impl<T: Transport> Bot<T> {
    pub fn new(db: Database, transport: T) -> Self {
        Self { db, transport }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle one event. Errors are reported to the user or logged here;
    /// nothing propagates to the poll loop.
    pub async fn handle(&self, event: InboundEvent) {
        let chat_id = event.chat_id();
        debug!(chat_id, kind = event.kind(), "Dispatching event");

        if let Err(e) = self.route(event).await {
            self.report(chat_id, e).await;
        }
    }

    async fn route(&self, event: InboundEvent) -> Result<(), BotError> {
        // Button presses and /start do not depend on where onboarding is
        let event = match event {
            InboundEvent::Callback {
                chat_id,
                callback_id,
                data,
            } => return self.on_callback(chat_id, &callback_id, &data).await,
            InboundEvent::Command {
                chat_id,
                command: Command::Start,
            } => return self.start_onboarding(chat_id).await,
            other => other,
        };

        let chat_id = event.chat_id();
        let state = self.onboarding_state(chat_id)?;

        match (state, event) {
            (_, InboundEvent::Command { command: Command::Unknown(name), .. }) => {
                debug!(chat_id, command = %name, "Ignoring unknown command");
                Ok(())
            }
            (Some(OnboardingState::Onboarded), InboundEvent::Command { command: Command::Find, .. }) => {
                self.find_match(chat_id).await
            }
            (_, InboundEvent::Command { command: Command::Find, .. }) => {
                self.say(chat_id, FINISH_PROFILE).await
            }
            (Some(OnboardingState::Onboarded), InboundEvent::Text { text, .. }) => {
                self.relay(chat_id, &text).await.map(|_| ())
            }
            (Some(OnboardingState::Onboarded), other) => {
                debug!(chat_id, kind = other.kind(), "Ignoring non-text message from onboarded user");
                Ok(())
            }
            (Some(step), event) => self.advance_onboarding(chat_id, step, &event).await,
            (None, event) => {
                debug!(chat_id, kind = event.kind(), "Ignoring event from unknown user");
                Ok(())
            }
        }
    }

    /// `None` means the user never sent `/start`.
    pub(crate) fn onboarding_state(&self, chat_id: UserId) -> Result<Option<OnboardingState>, BotError> {
        let state = match self.db.get_user(chat_id)? {
            Some(row) => Some(row.to_profile()?.state),
            None => None,
        };
        Ok(state)
    }

    pub(crate) async fn say(&self, chat_id: UserId, text: &str) -> Result<(), BotError> {
        self.transport
            .send_text(chat_id, text)
            .await
            .map_err(BotError::Transport)
    }

    async fn report(&self, chat_id: UserId, err: BotError) {
        let notice = match &err {
            BotError::NoCandidate => {
                debug!(chat_id, "No candidates left");
                Some(NO_MATCHES)
            }
            BotError::MalformedCallback(_) => {
                warn!(chat_id, "Rejected callback: {}", err);
                None
            }
            BotError::Persistence(_) => {
                error!(chat_id, "Step aborted: {}", err);
                Some(GENERIC_FAILURE)
            }
            BotError::Transport(_) => {
                error!(chat_id, "Send failed: {}", err);
                None
            }
        };

        if let Some(text) = notice {
            if let Err(e) = self.transport.send_text(chat_id, text).await {
                error!(chat_id, "Failed to notify user: {:#}", e);
            }
        }
    }
}
