//! Client Context

use std::{path::Path, sync::Arc};

use crate::{
    catalog::HttpCatalogClient,
    config::{ApiConfig, EngineConfig},
    discounts::HttpDiscountClient,
    engine::CartEngine,
    storage::JsonFileStorage,
};

/// Fully wired client: file-backed storage plus the HTTP catalog and
/// promotion clients behind one [`CartEngine`].
#[derive(Clone)]
pub struct ClientContext {
    /// The cart engine.
    pub engine: Arc<CartEngine>,
}

impl ClientContext {
    /// Builds the context for an API base URL and a local storage
    /// directory, restoring any previously persisted cart.
    pub async fn from_api(api: ApiConfig, storage_dir: &Path, config: EngineConfig) -> Self {
        let storage = Arc::new(JsonFileStorage::new(storage_dir));
        let catalog = Arc::new(HttpCatalogClient::new(api.clone()));
        let discounts = Arc::new(HttpDiscountClient::new(api));

        let engine = CartEngine::load(storage, catalog, discounts, config).await;

        Self {
            engine: Arc::new(engine),
        }
    }
}
