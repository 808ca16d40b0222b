mod config;
mod dispatch;
mod enrich;
mod event;
mod normalize;
mod render;
mod route;
mod telegram;
mod webhook;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::dispatch::Relay;
use crate::route::RouteTable;
use crate::webhook::WebhookClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tgrelay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let routes = RouteTable::from_config(&config.routes, &config.default_webhook)?;
    if routes.is_empty() {
        warn!(
            "No channel-webhook mappings or default webhook URL configured. \
             Messages will be received but not forwarded."
        );
    } else {
        info!(
            "Configured to monitor {} specific chats with dedicated webhooks.",
            routes.len()
        );
        if routes.has_default() {
            info!("Default webhook URL is set for any non-mapped chats.");
        }
    }

    let relay = Arc::new(Relay::new(routes, Arc::new(WebhookClient::new())));
    let bot = Bot::new(&config.telegram.bot_token);

    info!("Relay is starting...");
    telegram::run(relay, bot).await?;

    Ok(())
}
