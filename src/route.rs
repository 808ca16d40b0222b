use std::collections::HashMap;

use anyhow::{Context, Result};

/// Immutable mapping from source chat id to destination webhook URL,
/// with an optional catch-all default. Built once at startup.
pub struct RouteTable {
    routes: HashMap<i64, String>,
    default: Option<String>,
}

impl RouteTable {
    /// Builds the table from the raw config values. Route keys are chat ids
    /// written as strings in TOML; a non-numeric key is a config error.
    pub fn from_config(routes: &HashMap<String, String>, default_webhook: &str) -> Result<Self> {
        let mut parsed = HashMap::new();
        for (key, url) in routes {
            let id: i64 = key
                .trim()
                .parse()
                .with_context(|| format!("Invalid chat id in [routes]: {}", key))?;
            parsed.insert(id, url.clone());
        }

        let default = if default_webhook.is_empty() {
            None
        } else {
            Some(default_webhook.to_string())
        };

        Ok(Self {
            routes: parsed,
            default,
        })
    }

    /// Dedicated route for the chat, else the default webhook, else none.
    /// A `None` means the chat is simply not tracked.
    pub fn resolve(&self, source_id: i64) -> Option<&str> {
        self.routes
            .get(&source_id)
            .map(String::as_str)
            .or(self.default.as_deref())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.default.is_none()
    }
}
