//! Chat assistant messages.

use serde::{Deserialize, Serialize};
use crate::video::Video;

/// Reply shown when the assistant could not answer.
pub const CHAT_FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the app
    User,
    /// The assistant
    Bot,
}

/// A single message in the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub sender: Sender,

    /// Message text
    pub text: String,
}

impl ChatMessage {
    /// Message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    /// Message from the assistant.
    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }
}

/// Assistant reply as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    /// Answer text
    #[serde(default)]
    pub answer: String,

    /// Videos recommended alongside the answer, if any
    #[serde(default)]
    pub videos: Option<Vec<Video>>,
}
