use anyhow::Result;
use async_trait::async_trait;

/// Raw payload fields as observed on an incoming update, before
/// classification. Presence flags mirror what the platform actually sets;
/// several can be populated at once (e.g. a photo message also carries a
/// caption).
#[derive(Debug, Clone, Default)]
pub struct RawContent {
    pub text: Option<String>,
    pub caption: Option<String>,
    pub photo: bool,
    pub video: bool,
    pub document: Option<RawDocument>,
    pub sticker: Option<RawSticker>,
    pub poll: Option<RawPoll>,
}

#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RawSticker {
    pub emoji: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RawPoll {
    pub question: String,
}

/// A message's single canonical payload. Classification picks exactly one
/// variant, so everything downstream is an exhaustive match instead of
/// repeated presence probing.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Photo { caption: Option<String> },
    Video { caption: Option<String> },
    Document {
        file_name: Option<String>,
        caption: Option<String>,
    },
    Sticker { emoji: Option<String> },
    Poll { question: String },
    Unsupported,
}

impl MessageContent {
    /// Classifies raw payload fields with strict precedence: text, photo,
    /// video, document, sticker, poll, then Unsupported. First match wins.
    /// Empty text does not count as text.
    pub fn classify(raw: RawContent) -> Self {
        if let Some(text) = raw.text {
            if !text.is_empty() {
                return MessageContent::Text(text);
            }
        }
        if raw.photo {
            return MessageContent::Photo {
                caption: raw.caption,
            };
        }
        if raw.video {
            return MessageContent::Video {
                caption: raw.caption,
            };
        }
        if let Some(document) = raw.document {
            return MessageContent::Document {
                file_name: document.file_name,
                caption: raw.caption,
            };
        }
        if let Some(sticker) = raw.sticker {
            return MessageContent::Sticker {
                emoji: sticker.emoji,
            };
        }
        if let Some(poll) = raw.poll {
            return MessageContent::Poll {
                question: poll.question,
            };
        }
        MessageContent::Unsupported
    }
}

/// One inbound message event. Constructed by the platform adapter,
/// processed once, then discarded.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub content: MessageContent,
    pub message_id: Option<i64>,
    /// Id of the message this one replies to, if any.
    pub reply_to: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Channel,
    Group,
    Direct,
}

/// Resolved source chat metadata. Name fields are optional because the
/// platform populates different subsets per chat kind.
#[derive(Debug, Clone)]
pub struct ChatInfo {
    pub id: i64,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Resolved message author: a person, or a chat posting as itself
/// (channel posts arrive authored by the channel).
#[derive(Debug, Clone)]
pub enum SenderInfo {
    User {
        id: u64,
        first_name: String,
        last_name: Option<String>,
    },
    Chat { id: i64, title: String },
}

/// The contract the pipeline needs from the real-time client for one event:
/// chat and sender resolution, plus a best-effort lookup of the sender of a
/// replied-to message. All three may fail; callers decide what failure means.
#[async_trait]
pub trait EventContext: Send + Sync {
    async fn chat(&self) -> Result<ChatInfo>;
    async fn sender(&self) -> Result<Option<SenderInfo>>;
    async fn replied_sender(&self, message_id: i64) -> Result<Option<String>>;
}
