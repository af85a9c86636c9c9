//! Catalog lookup client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use treadline::{prices::Price, products::{ProductId, ProductSnapshot}};

use crate::config::ApiConfig;

/// Errors raised by a catalog lookup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product no longer exists server-side.
    #[error("product not found")]
    NotFound,

    /// HTTP transport or serialization failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status other than 404.
    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),
}

/// Read-only view of the remote product catalog.
#[automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches the current catalog data for one product.
    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, CatalogError>;
}

/// HTTP client for the storefront catalog API.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    config: ApiConfig,
    http: Client,
}

impl HttpCatalogClient {
    /// Creates a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, CatalogError> {
        let url = format!("{}/products/{id}", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "product lookup failed with status {status}: {text}"
            )));
        }

        let parsed: ProductResponse = response.json().await?;

        Ok(parsed.into_snapshot())
    }
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    name: String,
    price: u64,
    brand: Option<BrandRef>,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
    width: Option<DimensionRef>,
    profile: Option<DimensionRef>,
    diameter: Option<DimensionRef>,
}

#[derive(Debug, Deserialize)]
struct BrandRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct DimensionRef {
    value: u32,
}

impl ProductResponse {
    fn into_snapshot(self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name,
            brand: self.brand.map(|brand| brand.name).unwrap_or_default(),
            price: Price::from_minor(self.price),
            image: self.image_url.unwrap_or_default(),
            width: self.width.map(|d| d.value),
            profile: self.profile.map(|d| d.value),
            diameter: self.diameter.map(|d| d.value),
        }
    }
}
