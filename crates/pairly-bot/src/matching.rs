use rand::seq::IndexedRandom;
use tracing::debug;

use pairly_types::UserId;
use pairly_types::api::decision_buttons;
use pairly_types::models::Candidate;

use crate::dispatcher::Bot;
use crate::error::BotError;
use crate::transport::Transport;

impl<T: Transport> Bot<T> {
    /// Pick one candidate uniformly at random from everyone `requester`
    /// has not decided on yet.
    pub fn select_candidate(&self, requester: UserId) -> Result<Option<Candidate>, BotError> {
        let eligible = self.db.eligible_candidates(requester)?;
        let Some(&chosen) = eligible.choose(&mut rand::rng()) else {
            return Ok(None);
        };
        Ok(self.db.get_candidate(chosen)?)
    }

    /// Present a candidate card with like/dislike buttons, or fail with
    /// `NoCandidate` when nobody is left.
    pub async fn find_match(&self, requester: UserId) -> Result<(), BotError> {
        let candidate = self.select_candidate(requester)?.ok_or(BotError::NoCandidate)?;
        debug!(requester, candidate = candidate.user_id, "Presenting candidate");

        self.transport
            .send_photo(
                requester,
                &candidate.photo_id,
                &candidate.caption(),
                &decision_buttons(candidate.user_id),
            )
            .await
            .map_err(BotError::Transport)
    }
}
