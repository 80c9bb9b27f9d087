pub mod api;
pub mod events;
pub mod models;

/// Platform user identity. In private chats this is also the chat id.
pub type UserId = i64;
