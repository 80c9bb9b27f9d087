/// Database row types. These map directly to SQLite rows and are kept
/// separate from the pairly-types domain models.
use anyhow::{Result, anyhow};
use pairly_types::models::{OnboardingState, Profile};

pub struct UserRow {
    pub telegram_id: i64,
    pub name: Option<String>,
    pub photo_id: Option<String>,
    pub bio: Option<String>,
    pub onboarding_state: String,
    pub created_at: String,
}

impl UserRow {
    pub fn to_profile(&self) -> Result<Profile> {
        let state = OnboardingState::parse(&self.onboarding_state).ok_or_else(|| {
            anyhow!(
                "Corrupt onboarding_state '{}' for user {}",
                self.onboarding_state,
                self.telegram_id
            )
        })?;

        Ok(Profile {
            user_id: self.telegram_id,
            name: self.name.clone(),
            photo_id: self.photo_id.clone(),
            bio: self.bio.clone(),
            state,
        })
    }
}

/// One relayed message, as returned by `get_chat_messages`.
#[derive(Debug, Clone)]
pub struct ChatRow {
    pub id: i64,
    pub match_id: i64,
    pub sender_id: i64,
    pub message: String,
    pub created_at: String,
}
