//! Shared test support.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use treadline::{
    prices::Price,
    products::{ProductId, ProductSnapshot},
};

use crate::{
    catalog::{CatalogClient, CatalogError},
    config::EngineConfig,
};

pub(crate) fn snapshot(name: &str, minor: u64) -> ProductSnapshot {
    ProductSnapshot::new(name, Price::from_minor(minor)).with_brand("Michelin")
}

/// Engine config with a throttle long enough that tests control every pass
/// explicitly.
pub(crate) fn test_config() -> EngineConfig {
    EngineConfig {
        sync_interval: Duration::from_secs(3600),
        ..EngineConfig::default()
    }
}

/// Catalog double whose lookups block until released, for interleaving
/// mutations with an in-flight reconciliation pass.
pub(crate) struct GatedCatalog {
    pub(crate) release: Notify,
    snapshot: ProductSnapshot,
}

impl GatedCatalog {
    pub(crate) fn new(snapshot: ProductSnapshot) -> Self {
        Self {
            release: Notify::new(),
            snapshot,
        }
    }
}

#[async_trait]
impl CatalogClient for GatedCatalog {
    async fn get_product(&self, _id: ProductId) -> Result<ProductSnapshot, CatalogError> {
        self.release.notified().await;

        Ok(self.snapshot.clone())
    }
}
