use crate::enrich::Enrichment;
use crate::normalize::{CanonicalMessage, MessageKind, NO_CAPTION, UNKNOWN_EMOJI, UNNAMED_FILE};

/// Renders the canonical message and its enrichment into the Discord
/// message body. Deterministic template; optional fields are omitted
/// entirely when absent.
pub fn render(record: &CanonicalMessage, enrichment: &Enrichment, forwarded_at: &str) -> String {
    let mut sender_line = format!("**Sender:** {}", enrichment.sender_name);
    if let Some(reply) = &enrichment.reply_summary {
        sender_line.push(' ');
        sender_line.push_str(reply);
    }

    let mut out = format!(
        "**New {} Message**\n**From:** {}\n{}\n\n{}\n\n*Forwarded at {}*",
        record.kind,
        enrichment.source_name,
        sender_line,
        content_block(record),
        forwarded_at,
    );

    if let Some(link) = &record.permalink {
        out.push_str(&format!("\n[View original message]({})", link));
    }

    out
}

/// The body section: plain text for text messages, bracketed attachment
/// summaries for everything else.
fn content_block(record: &CanonicalMessage) -> String {
    match record.kind {
        MessageKind::Text | MessageKind::Unsupported => record.body.clone(),
        MessageKind::Photo | MessageKind::Video => {
            if record.body.is_empty() {
                let label = record.attachment_label.as_deref().unwrap_or(NO_CAPTION);
                format!("[{} with {}]", record.kind, label)
            } else {
                record.body.clone()
            }
        }
        MessageKind::Document => {
            let label = record.attachment_label.as_deref().unwrap_or(UNNAMED_FILE);
            let mut block = format!("[Document: {}]", label);
            if !record.body.is_empty() {
                block.push('\n');
                block.push_str(&record.body);
            }
            block
        }
        MessageKind::Sticker => {
            let label = record.attachment_label.as_deref().unwrap_or(UNKNOWN_EMOJI);
            format!("[Sticker: {}]", label)
        }
        MessageKind::Poll => {
            let label = record.attachment_label.as_deref().unwrap_or_default();
            format!("[Poll: {}]", label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrichment(reply: Option<&str>) -> Enrichment {
        Enrichment {
            source_name: "Jobs".to_string(),
            sender_name: "Ana".to_string(),
            reply_summary: reply.map(str::to_string),
        }
    }

    fn record(kind: MessageKind, body: &str, label: Option<&str>) -> CanonicalMessage {
        CanonicalMessage {
            kind,
            body: body.to_string(),
            attachment_label: label.map(str::to_string),
            permalink: None,
        }
    }

    #[test]
    fn renders_text_message_template() {
        let out = render(
            &record(MessageKind::Text, "Hello", None),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert_eq!(
            out,
            "**New Text Message**\n**From:** Jobs\n**Sender:** Ana\n\nHello\n\n*Forwarded at 2026-08-30 12:00:00*"
        );
    }

    #[test]
    fn includes_reply_summary_on_sender_line() {
        let out = render(
            &record(MessageKind::Text, "Hello", None),
            &enrichment(Some("(In reply to: Boris)")),
            "2026-08-30 12:00:00",
        );
        assert!(out.contains("**Sender:** Ana (In reply to: Boris)"));
    }

    #[test]
    fn appends_permalink_line_when_present() {
        let mut rec = record(MessageKind::Text, "Hello", None);
        rec.permalink = Some("https://t.me/jobsfeed/77".to_string());
        let out = render(&rec, &enrichment(None), "2026-08-30 12:00:00");
        assert!(out.ends_with("\n[View original message](https://t.me/jobsfeed/77)"));
    }

    #[test]
    fn photo_without_caption_renders_marker() {
        let out = render(
            &record(MessageKind::Photo, "", Some(NO_CAPTION)),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert!(out.contains("\n\n[Photo with no caption]\n\n"));
    }

    #[test]
    fn captioned_video_renders_caption_only() {
        let out = render(
            &record(MessageKind::Video, "trailer", None),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert!(out.contains("\n\ntrailer\n\n"));
        assert!(!out.contains("[Video"));
    }

    #[test]
    fn document_renders_name_then_caption() {
        let out = render(
            &record(MessageKind::Document, "Q3 numbers", Some("report.pdf")),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert!(out.contains("[Document: report.pdf]\nQ3 numbers"));
    }

    #[test]
    fn sticker_and_poll_render_labels() {
        let sticker = render(
            &record(MessageKind::Sticker, "", Some("😀")),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert!(sticker.contains("[Sticker: 😀]"));

        let poll = render(
            &record(MessageKind::Poll, "", Some("Lunch?")),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert!(poll.contains("[Poll: Lunch?]"));
    }

    #[test]
    fn unsupported_message_announces_unknown_kind() {
        let out = render(
            &record(MessageKind::Unsupported, "[Unsupported message type]", None),
            &enrichment(None),
            "2026-08-30 12:00:00",
        );
        assert!(out.starts_with("**New Unknown Message**"));
        assert!(out.contains("[Unsupported message type]"));
    }
}
