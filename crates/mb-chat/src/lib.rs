pub mod bot;
pub mod fallback;

pub use bot::{ChatConfig, ChatError, ChatReply, Chatbot, ReplySource};
pub use fallback::fallback_response;
