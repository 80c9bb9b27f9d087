use crate::UserId;

/// Where a user is in the profile setup flow.
///
/// Persisted as text in `users.onboarding_state`. A user with no row at all
/// has not started yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    AwaitingName,
    AwaitingPhoto,
    AwaitingBio,
    Onboarded,
}

impl OnboardingState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingName => "awaiting_name",
            Self::AwaitingPhoto => "awaiting_photo",
            Self::AwaitingBio => "awaiting_bio",
            Self::Onboarded => "onboarded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "awaiting_name" => Some(Self::AwaitingName),
            "awaiting_photo" => Some(Self::AwaitingPhoto),
            "awaiting_bio" => Some(Self::AwaitingBio),
            "onboarded" => Some(Self::Onboarded),
            _ => None,
        }
    }

    /// The state a successful step moves to. `Onboarded` is terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::AwaitingName => Some(Self::AwaitingPhoto),
            Self::AwaitingPhoto => Some(Self::AwaitingBio),
            Self::AwaitingBio => Some(Self::Onboarded),
            Self::Onboarded => None,
        }
    }
}

/// A directional like/dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Liked,
    Rejected,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "liked" => Some(Self::Liked),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub name: Option<String>,
    pub photo_id: Option<String>,
    pub bio: Option<String>,
    pub state: OnboardingState,
}

impl Profile {
    /// Name shown to other users. Falls back to a neutral label for rows
    /// created by `/start` that never got a name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Someone")
    }
}

/// A user offered to someone running `/find`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub user_id: UserId,
    pub name: String,
    pub photo_id: String,
    pub bio: String,
}

impl Candidate {
    pub fn caption(&self) -> String {
        format!("🌟 {}\n{}", self.name, self.bio)
    }
}

/// Two users who liked each other. `id` is the older of the two decision
/// rows, so both sides of the conversation log against the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutualMatch {
    pub id: i64,
    pub user_id: UserId,
    pub partner_id: UserId,
}
