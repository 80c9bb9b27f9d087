pub mod client;
pub mod poller;
pub mod telegram;

pub use client::TelegramClient;
