use tracing::debug;

use crate::event::{ChatInfo, ChatKind, EventContext, MessageEvent, SenderInfo};

/// Sender name used when resolution fails or returns nothing.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Per-event auxiliary metadata not present on the raw message. Derived
/// fresh for every event; nothing is cached between events.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub source_name: String,
    pub sender_name: String,
    pub reply_summary: Option<String>,
}

/// Resolves display names and the reply summary for one event. Every step
/// is fail-open: lookup errors degrade to fallback values instead of
/// propagating.
pub async fn enrich(event: &MessageEvent, chat: &ChatInfo, ctx: &dyn EventContext) -> Enrichment {
    let sender_name = match ctx.sender().await {
        Ok(Some(sender)) => sender_name(&sender),
        Ok(None) => UNKNOWN_SENDER.to_string(),
        Err(e) => {
            debug!("Sender resolution failed: {:#}", e);
            UNKNOWN_SENDER.to_string()
        }
    };

    let reply_summary = match event.reply_to {
        Some(message_id) => match ctx.replied_sender(message_id).await {
            Ok(Some(name)) => Some(format!("(In reply to: {})", name)),
            Ok(None) => None,
            Err(e) => {
                debug!("Reply lookup for message {} failed: {:#}", message_id, e);
                None
            }
        },
        None => None,
    };

    Enrichment {
        source_name: source_name(chat),
        sender_name,
        reply_summary,
    }
}

/// Display name of the source chat: title for channels and groups, the
/// person's name for direct chats, and a literal id fallback otherwise.
pub fn source_name(chat: &ChatInfo) -> String {
    match chat.kind {
        ChatKind::Channel | ChatKind::Group => chat
            .title
            .clone()
            .unwrap_or_else(|| format!("Chat {}", chat.id)),
        ChatKind::Direct => match (&chat.first_name, &chat.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => format!("Chat {}", chat.id),
        },
    }
}

/// Display name of the sender. Policy: a person's first name, with the last
/// name appended when present; an organizational sender's title; the numeric
/// id as a string when the name fields are empty.
pub fn sender_name(sender: &SenderInfo) -> String {
    match sender {
        SenderInfo::User {
            id,
            first_name,
            last_name,
        } => {
            if first_name.is_empty() {
                id.to_string()
            } else if let Some(last) = last_name {
                format!("{} {}", first_name, last)
            } else {
                first_name.clone()
            }
        }
        SenderInfo::Chat { id, title } => {
            if title.is_empty() {
                id.to_string()
            } else {
                title.clone()
            }
        }
    }
}
