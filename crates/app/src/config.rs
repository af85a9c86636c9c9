//! Engine and API configuration.

use std::time::Duration;

/// Storage key the cart line list is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "treadline.cart";

/// Default minimum delay between two catalog reconciliation passes.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for connecting to the storefront API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API base URL, e.g. `"https://api.example.com"`. A trailing slash is
    /// tolerated.
    pub base_url: String,
}

impl ApiConfig {
    /// Creates a config for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();

        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { base_url }
    }
}

/// Tunables of the cart engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Storage key the serialized line list lives under.
    pub storage_key: String,

    /// Minimum delay between two reconciliation passes; `sync_now` bypasses
    /// it.
    pub sync_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}
