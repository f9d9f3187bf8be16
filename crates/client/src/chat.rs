//! Assistant chat session with a persisted history.

use std::sync::Arc;

use rehabfit_core::{ChatMessage, Video, CHAT_FALLBACK_REPLY};
use rehabfit_storage::{CacheScope, ChatHistoryStore, LocalCache, VideoListStore};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::Result;

/// What one exchange produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    /// Bot reply appended to the history
    pub reply: ChatMessage,

    /// Videos sent with the reply, possibly empty; when present they replaced
    /// the cached list
    pub videos: Option<Vec<Video>>,

    /// Whether the backend answered (false means the fallback reply was used)
    pub answered: bool,
}

/// A chat conversation for one cache scope.
pub struct ChatSession<C: LocalCache + ?Sized> {
    api: ApiClient,
    history: ChatHistoryStore<C>,
    videos: VideoListStore<C>,
    messages: Vec<ChatMessage>,
}

impl<C: LocalCache + ?Sized> ChatSession<C> {
    /// Open the session, loading any saved history for `scope`.
    pub async fn open(api: ApiClient, cache: Arc<C>, scope: &CacheScope) -> Result<Self> {
        let history = ChatHistoryStore::new(cache.clone(), scope);
        let videos = VideoListStore::new(cache, scope);
        let messages = history.load().await?;
        debug!(key = history.key(), messages = messages.len(), "opened chat session");
        Ok(Self { api, history, videos, messages })
    }

    /// Messages so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send a message. Blank input is ignored and returns `None`.
    ///
    /// The user message is saved before the backend is contacted, so it
    /// survives a failed request.
    pub async fn send(&mut self, input: &str) -> Result<Option<ChatOutcome>> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.messages.push(ChatMessage::user(text));
        self.history.save(&self.messages).await?;

        if let Err(e) = self.api.upsert_chat(text).await {
            warn!(error = %e, "failed to index chat message");
        }

        let outcome = match self.api.chat(text).await {
            Ok(reply) => {
                let videos = reply.videos;
                if let Some(ref list) = videos {
                    self.videos.save(list).await?;
                }
                ChatOutcome { reply: ChatMessage::bot(reply.answer), videos, answered: true }
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                ChatOutcome {
                    reply: ChatMessage::bot(CHAT_FALLBACK_REPLY),
                    videos: None,
                    answered: false,
                }
            }
        };

        self.messages.push(outcome.reply.clone());
        self.history.save(&self.messages).await?;
        Ok(Some(outcome))
    }

    /// Forget the conversation.
    pub async fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        self.history.clear().await?;
        Ok(())
    }
}
