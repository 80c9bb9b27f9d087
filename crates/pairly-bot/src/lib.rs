pub mod dispatcher;
pub mod error;
pub mod ledger;
pub mod matching;
pub mod relay;
pub mod session;
pub mod transport;

pub use dispatcher::Bot;
pub use error::BotError;
pub use transport::Transport;
