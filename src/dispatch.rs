use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, error, info};

use crate::enrich;
use crate::event::{EventContext, MessageEvent};
use crate::normalize;
use crate::render;
use crate::route::RouteTable;

/// Outbound delivery seam. The production impl posts to Discord webhooks.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, endpoint: &str, content: &str) -> Result<()>;
}

/// The relay pipeline: route, normalize, enrich, render, deliver.
/// Holds no mutable state, so any number of events can run through it
/// concurrently without coordination.
pub struct Relay {
    routes: RouteTable,
    transport: Arc<dyn Transport>,
}

impl Relay {
    pub fn new(routes: RouteTable, transport: Arc<dyn Transport>) -> Self {
        Self { routes, transport }
    }

    /// Entry point for one inbound message. This is the per-event error
    /// boundary: failures are logged and dropped here, never propagated,
    /// so one bad event cannot affect the next.
    pub async fn on_event(&self, event: MessageEvent, ctx: &dyn EventContext) {
        if let Err(e) = self.process(event, ctx).await {
            error!("Error handling message: {:#}", e);
        }
    }

    async fn process(&self, event: MessageEvent, ctx: &dyn EventContext) -> Result<()> {
        let chat = ctx.chat().await.context("Failed to resolve chat")?;

        let Some(endpoint) = self.routes.resolve(chat.id) else {
            debug!("No webhook configured for chat {}, skipping message", chat.id);
            return Ok(());
        };

        let record = normalize::normalize(&event, &chat);
        let enrichment = enrich::enrich(&event, &chat, ctx).await;

        let forwarded_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let content = render::render(&record, &enrichment, &forwarded_at);

        self.transport
            .deliver(endpoint, &content)
            .await
            .with_context(|| format!("Failed to forward message from {}", enrichment.source_name))?;

        info!(
            "Successfully forwarded {} message from {} to Discord webhook",
            record.kind, enrichment.source_name
        );
        Ok(())
    }
}
