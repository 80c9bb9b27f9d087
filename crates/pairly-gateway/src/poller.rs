use std::time::Duration;

use tracing::{info, trace, warn};

use pairly_bot::Bot;

use crate::client::TelegramClient;

/// Pause after a failed poll before trying again.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-poll forever, handing each update to the bot in order. Each event
/// is fully handled before the next one is looked at.
pub async fn run_poll_loop(bot: &Bot<TelegramClient>, poll_timeout: Duration) {
    let mut offset: i64 = 0;
    info!("Polling for updates (timeout {}s)", poll_timeout.as_secs());

    loop {
        let updates = match bot.transport().get_updates(offset, poll_timeout).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("Polling failed, retrying in {}s: {:#}", RETRY_DELAY.as_secs(), e);
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = next_offset(offset, update.update_id);
            match update.into_event() {
                Some(event) => bot.handle(event).await,
                None => trace!("Skipping unsupported update"),
            }
        }
    }
}

/// Acknowledge everything up to and including `update_id`.
fn next_offset(current: i64, update_id: i64) -> i64 {
    current.max(update_id + 1)
}
