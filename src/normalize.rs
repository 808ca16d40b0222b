use crate::event::{ChatInfo, MessageContent, MessageEvent};

/// Label used for photos/videos without a caption.
pub const NO_CAPTION: &str = "no caption";
/// Label used for documents whose attributes carry no file name.
pub const UNNAMED_FILE: &str = "Unnamed";
/// Label used for stickers without an associated emoji.
pub const UNKNOWN_EMOJI: &str = "Unknown";
/// Body used for payloads the relay does not understand.
pub const UNSUPPORTED_BODY: &str = "[Unsupported message type]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Photo,
    Video,
    Document,
    Sticker,
    Poll,
    Unsupported,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Text => write!(f, "Text"),
            MessageKind::Photo => write!(f, "Photo"),
            MessageKind::Video => write!(f, "Video"),
            MessageKind::Document => write!(f, "Document"),
            MessageKind::Sticker => write!(f, "Sticker"),
            MessageKind::Poll => write!(f, "Poll"),
            // Unrecognized payloads are announced as "Unknown" in the
            // forwarded header.
            MessageKind::Unsupported => write!(f, "Unknown"),
        }
    }
}

/// The single normalized form every inbound message is reduced to.
/// Built once per event, immutable, dropped after the delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMessage {
    pub kind: MessageKind,
    pub body: String,
    pub attachment_label: Option<String>,
    pub permalink: Option<String>,
}

/// Reduces a classified message to its canonical form. Pure and total:
/// unrecognized payloads become `Unsupported`, never an error.
pub fn normalize(event: &MessageEvent, chat: &ChatInfo) -> CanonicalMessage {
    let (kind, body, attachment_label) = match &event.content {
        MessageContent::Text(text) => (MessageKind::Text, text.clone(), None),
        MessageContent::Photo { caption } => match caption {
            Some(caption) => (MessageKind::Photo, caption.clone(), None),
            None => (MessageKind::Photo, String::new(), Some(NO_CAPTION.to_string())),
        },
        MessageContent::Video { caption } => match caption {
            Some(caption) => (MessageKind::Video, caption.clone(), None),
            None => (MessageKind::Video, String::new(), Some(NO_CAPTION.to_string())),
        },
        MessageContent::Document { file_name, caption } => {
            let label = file_name.clone().unwrap_or_else(|| UNNAMED_FILE.to_string());
            let body = caption.clone().unwrap_or_default();
            (MessageKind::Document, body, Some(label))
        }
        MessageContent::Sticker { emoji } => {
            let label = emoji.clone().unwrap_or_else(|| UNKNOWN_EMOJI.to_string());
            (MessageKind::Sticker, String::new(), Some(label))
        }
        MessageContent::Poll { question } => {
            (MessageKind::Poll, String::new(), Some(question.clone()))
        }
        MessageContent::Unsupported => {
            (MessageKind::Unsupported, UNSUPPORTED_BODY.to_string(), None)
        }
    };

    CanonicalMessage {
        kind,
        body,
        attachment_label,
        permalink: permalink(chat, event.message_id),
    }
}

/// Deep link to the original message. Only constructible for chats with a
/// public username and messages with a stable id; anything else is `None`,
/// never a malformed URL.
fn permalink(chat: &ChatInfo, message_id: Option<i64>) -> Option<String> {
    let username = chat.username.as_deref().filter(|u| !u.is_empty())?;
    let id = message_id?;
    Some(format!("https://t.me/{}/{}", username, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ChatKind;

    fn channel(username: Option<&str>) -> ChatInfo {
        ChatInfo {
            id: -1001667394379,
            kind: ChatKind::Channel,
            title: Some("Jobs".to_string()),
            first_name: None,
            last_name: None,
            username: username.map(str::to_string),
        }
    }

    fn event(content: MessageContent, message_id: Option<i64>) -> MessageEvent {
        MessageEvent {
            content,
            message_id,
            reply_to: None,
        }
    }

    #[test]
    fn text_message_keeps_body_verbatim() {
        let record = normalize(
            &event(MessageContent::Text("Hello".to_string()), None),
            &channel(None),
        );
        assert_eq!(record.kind, MessageKind::Text);
        assert_eq!(record.body, "Hello");
        assert_eq!(record.attachment_label, None);
    }

    #[test]
    fn photo_without_caption_gets_marker_label() {
        let record = normalize(
            &event(MessageContent::Photo { caption: None }, None),
            &channel(None),
        );
        assert_eq!(record.kind, MessageKind::Photo);
        assert!(record.body.is_empty());
        assert_eq!(record.attachment_label.as_deref(), Some(NO_CAPTION));
    }

    #[test]
    fn photo_caption_becomes_body() {
        let record = normalize(
            &event(
                MessageContent::Photo {
                    caption: Some("sunset".to_string()),
                },
                None,
            ),
            &channel(None),
        );
        assert_eq!(record.body, "sunset");
        assert_eq!(record.attachment_label, None);
    }

    #[test]
    fn document_label_is_file_name() {
        let record = normalize(
            &event(
                MessageContent::Document {
                    file_name: Some("report.pdf".to_string()),
                    caption: None,
                },
                None,
            ),
            &channel(None),
        );
        assert_eq!(record.kind, MessageKind::Document);
        assert_eq!(record.attachment_label.as_deref(), Some("report.pdf"));
        assert!(record.body.is_empty());
    }

    #[test]
    fn nameless_document_gets_unnamed_label() {
        let record = normalize(
            &event(
                MessageContent::Document {
                    file_name: None,
                    caption: Some("see attached".to_string()),
                },
                None,
            ),
            &channel(None),
        );
        assert_eq!(record.attachment_label.as_deref(), Some(UNNAMED_FILE));
        assert_eq!(record.body, "see attached");
    }

    #[test]
    fn sticker_without_emoji_gets_unknown_label() {
        let record = normalize(
            &event(MessageContent::Sticker { emoji: None }, None),
            &channel(None),
        );
        assert_eq!(record.attachment_label.as_deref(), Some(UNKNOWN_EMOJI));
    }

    #[test]
    fn unsupported_payload_never_fails() {
        let record = normalize(&event(MessageContent::Unsupported, None), &channel(None));
        assert_eq!(record.kind, MessageKind::Unsupported);
        assert_eq!(record.body, UNSUPPORTED_BODY);
    }

    #[test]
    fn permalink_requires_username_and_message_id() {
        let content = MessageContent::Text("hi".to_string());

        let with_both = normalize(&event(content.clone(), Some(77)), &channel(Some("jobsfeed")));
        assert_eq!(
            with_both.permalink.as_deref(),
            Some("https://t.me/jobsfeed/77")
        );

        let no_username = normalize(&event(content.clone(), Some(77)), &channel(None));
        assert_eq!(no_username.permalink, None);

        let empty_username = normalize(&event(content.clone(), Some(77)), &channel(Some("")));
        assert_eq!(empty_username.permalink, None);

        let no_id = normalize(&event(content, None), &channel(Some("jobsfeed")));
        assert_eq!(no_id.permalink, None);
    }
}
