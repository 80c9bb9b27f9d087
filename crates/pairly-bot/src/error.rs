use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    /// Nobody left to show. Reported to the user, not logged as a failure.
    #[error("no eligible candidate")]
    NoCandidate,

    #[error("persistence failure: {0:#}")]
    Persistence(#[from] anyhow::Error),

    #[error("malformed callback data: {0:?}")]
    MalformedCallback(String),

    #[error("transport failure: {0:#}")]
    Transport(anyhow::Error),
}
