use tracing::{debug, info};

use pairly_types::UserId;

use crate::dispatcher::Bot;
use crate::error::BotError;
use crate::transport::Transport;

pub fn relayed(text: &str) -> String {
    format!("💬 From your match: {}", text)
}

impl<T: Transport> Bot<T> {
    /// Forward `text` to the sender's most recent mutual match and log it
    /// against that match. Returns false when the sender has no match.
    pub async fn relay(&self, sender: UserId, text: &str) -> Result<bool, BotError> {
        let Some(active) = self.db.active_match(sender)? else {
            debug!(sender, "No active match, not relaying");
            return Ok(false);
        };

        // Log before sending; a failed write means no relay
        self.db.insert_chat_message(active.id, sender, text)?;
        self.say(active.partner_id, &relayed(text)).await?;

        info!(sender, receiver = active.partner_id, match_id = active.id, "Relayed message");
        Ok(true)
    }
}
