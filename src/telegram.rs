use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Chat;
use tracing::{debug, info};

use crate::dispatch::Relay;
use crate::enrich::UNKNOWN_SENDER;
use crate::event::{
    ChatInfo, ChatKind, EventContext, MessageContent, MessageEvent, RawContent, RawDocument,
    RawPoll, RawSticker, SenderInfo,
};

/// Subscribes to new-message updates and feeds each one through the relay.
/// Runs until the connection to Telegram is lost. Group messages, direct
/// chats, and channel posts all land in the same handler.
pub async fn run(relay: Arc<Relay>, bot: Bot) -> Result<()> {
    info!("Starting Telegram listener...");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_update))
        .branch(Update::filter_channel_post().endpoint(handle_update));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![relay])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_update(msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
    let (event, ctx) = convert(&msg);
    relay.on_event(event, &ctx).await;
    Ok(())
}

/// Everything the pipeline may ask for about one update, captured up front
/// from the teloxide message so resolution never goes back to the wire.
struct TelegramEventContext {
    chat: ChatInfo,
    sender: Option<SenderInfo>,
    replied_sender: Option<String>,
}

#[async_trait]
impl EventContext for TelegramEventContext {
    async fn chat(&self) -> Result<ChatInfo> {
        Ok(self.chat.clone())
    }

    async fn sender(&self) -> Result<Option<SenderInfo>> {
        Ok(self.sender.clone())
    }

    async fn replied_sender(&self, _message_id: i64) -> Result<Option<String>> {
        Ok(self.replied_sender.clone())
    }
}

fn convert(msg: &Message) -> (MessageEvent, TelegramEventContext) {
    let raw = RawContent {
        text: msg.text().map(str::to_string),
        caption: msg.caption().map(str::to_string),
        photo: msg.photo().is_some(),
        video: msg.video().is_some(),
        document: msg.document().map(|d| RawDocument {
            file_name: d.file_name.clone(),
        }),
        sticker: msg.sticker().map(|s| RawSticker {
            emoji: s.emoji.clone(),
        }),
        poll: msg.poll().map(|p| RawPoll {
            question: p.question.clone(),
        }),
    };

    let event = MessageEvent {
        content: MessageContent::classify(raw),
        message_id: Some(i64::from(msg.id.0)),
        reply_to: msg.reply_to_message().map(|r| i64::from(r.id.0)),
    };

    let ctx = TelegramEventContext {
        chat: chat_info(&msg.chat),
        sender: sender_info(msg),
        replied_sender: msg.reply_to_message().map(reply_sender_name),
    };

    (event, ctx)
}

fn chat_info(chat: &Chat) -> ChatInfo {
    let kind = if chat.is_private() {
        ChatKind::Direct
    } else if chat.is_channel() {
        ChatKind::Channel
    } else {
        ChatKind::Group
    };

    ChatInfo {
        id: chat.id.0,
        kind,
        title: chat.title().map(str::to_string),
        first_name: chat.first_name().map(str::to_string),
        last_name: chat.last_name().map(str::to_string),
        username: chat.username().map(str::to_string),
    }
}

fn sender_info(msg: &Message) -> Option<SenderInfo> {
    if let Some(user) = msg.from.as_ref() {
        return Some(SenderInfo::User {
            id: user.id.0,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        });
    }

    // Channel posts are authored by the channel itself.
    msg.sender_chat.as_ref().map(|chat| SenderInfo::Chat {
        id: chat.id.0,
        title: chat.title().unwrap_or_default().to_string(),
    })
}

fn reply_sender_name(reply: &Message) -> String {
    if let Some(user) = reply.from.as_ref() {
        return user.first_name.clone();
    }
    if let Some(title) = reply.sender_chat.as_ref().and_then(|c| c.title()) {
        return title.to_string();
    }
    UNKNOWN_SENDER.to_string()
}
