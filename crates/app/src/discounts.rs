//! Promotion validation client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use treadline::prices::Price;

use crate::config::ApiConfig;

/// Errors raised by a discount validation.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// The server declined the code (invalid, expired, not applicable).
    #[error("promo code rejected{}", display_reason(.message))]
    Rejected {
        /// Optional server-supplied reason.
        message: Option<String>,
    },

    /// HTTP transport or serialization failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

fn display_reason(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|reason| format!(": {reason}"))
        .unwrap_or_default()
}

/// A discount computation accepted by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDiscount {
    /// Canonical promo code as stored server-side.
    pub code: String,
    /// Granted discount amount.
    pub discount_amount: Price,
    /// The subtotal the computation was made for.
    pub subtotal: Price,
    /// Server-computed total after the discount.
    pub total_after_discount: Price,
}

/// Remote discount computation for a promo code and subtotal.
#[automock]
#[async_trait]
pub trait DiscountClient: Send + Sync {
    /// Asks the server to compute the discount for `code` at `subtotal`.
    async fn validate(&self, code: &str, subtotal: Price)
    -> Result<ValidatedDiscount, DiscountError>;
}

/// HTTP client for the storefront promotion API.
#[derive(Debug, Clone)]
pub struct HttpDiscountClient {
    config: ApiConfig,
    http: Client,
}

impl HttpDiscountClient {
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
impl DiscountClient for HttpDiscountClient {
    async fn validate(
        &self,
        code: &str,
        subtotal: Price,
    ) -> Result<ValidatedDiscount, DiscountError> {
        let url = format!("{}/promotions/validate-discount", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[
                ("code", code.to_string()),
                ("subtotal", subtotal.minor_units().to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .json::<RejectionResponse>()
                .await
                .ok()
                .and_then(|body| body.message);

            return Err(DiscountError::Rejected { message });
        }

        let parsed: DiscountResponse = response.json().await?;

        Ok(ValidatedDiscount {
            code: parsed.code,
            discount_amount: Price::from_minor(parsed.discount_amount),
            subtotal: Price::from_minor(parsed.subtotal),
            total_after_discount: Price::from_minor(parsed.total_after_discount),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscountResponse {
    code: String,
    discount_amount: u64,
    subtotal: u64,
    total_after_discount: u64,
}

#[derive(Debug, Deserialize)]
struct RejectionResponse {
    message: Option<String>,
}
