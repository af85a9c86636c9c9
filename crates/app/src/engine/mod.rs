//! Cart engine.
//!
//! Sole owner and mutator of the in-process cart. Mutations are applied
//! atomically under a lock and persisted when they change the line list;
//! an active discount is re-validated whenever the subtotal moves; catalog
//! reconciliation runs as a throttled background pass that refreshes
//! denormalized snapshots and prunes lines whose product disappeared
//! upstream.
//!
//! Callers are expected to drive the engine from a single logical task;
//! persistence writes then follow mutation order. Reconciliation and
//! discount re-validation are best-effort: their network failures degrade
//! (stale line, detached promo) and are never surfaced to the caller that
//! triggered them.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Instant;

use futures::future::join_all;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{Span, debug, info, warn};
use treadline::{
    cart::Cart,
    lines::CartLine,
    products::{ProductId, ProductSnapshot},
    promotions::AppliedDiscount,
    totals::CartTotals,
};

use crate::{
    catalog::{CatalogClient, CatalogError},
    config::EngineConfig,
    discounts::{DiscountClient, DiscountError},
    storage::{CartStorage, records},
};

/// Failures of [`CartEngine::apply_promo_code`], the one operation whose
/// network outcome is reported to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    /// The supplied code was empty after trimming.
    #[error("promo code must not be empty")]
    EmptyCode,

    /// The cart has no payable subtotal to discount.
    #[error("cannot apply a promo code to an empty cart")]
    EmptyCart,

    /// The server declined the code.
    #[error("{0}")]
    Rejected(String),

    /// The promotion service could not be reached.
    #[error("promotion service is unavailable")]
    Unavailable,
}

/// Outcome counts of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Lines whose denormalized snapshot was updated.
    pub refreshed: usize,
    /// Lines dropped because the product no longer exists.
    pub dropped: usize,
    /// Lookups that failed transiently; their lines were left stale.
    pub failed: usize,
}

/// The cart engine. See the module docs for the behavioural contract.
pub struct CartEngine {
    state: Mutex<Cart>,
    storage: Arc<dyn CartStorage>,
    catalog: Arc<dyn CatalogClient>,
    discounts: Arc<dyn DiscountClient>,
    config: EngineConfig,
    last_sync: Mutex<Option<Instant>>,
    sync_in_flight: AtomicBool,
}

impl CartEngine {
    /// Restores the cart from storage and builds an engine around it.
    ///
    /// A missing, unreadable or malformed blob restores as an empty cart;
    /// storage trouble is logged, never surfaced. The promo state always
    /// starts detached; discounts are not persisted.
    pub async fn load(
        storage: Arc<dyn CartStorage>,
        catalog: Arc<dyn CatalogClient>,
        discounts: Arc<dyn DiscountClient>,
        config: EngineConfig,
    ) -> Self {
        let cart = match storage.read(&config.storage_key).await {
            Ok(Some(blob)) => match records::decode_lines(&blob) {
                Ok(lines) => Cart::with_lines(lines),
                Err(error) => {
                    warn!(%error, "stored cart is malformed; starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "failed to read stored cart; starting empty");
                Cart::new()
            }
        };

        Self {
            state: Mutex::new(cart),
            storage,
            catalog,
            discounts,
            config,
            last_sync: Mutex::new(None),
            sync_in_flight: AtomicBool::new(false),
        }
    }

    /// Adds units of a product to the cart. A zero quantity adds one unit.
    pub async fn add_item(&self, id: ProductId, snapshot: ProductSnapshot, quantity: u32) {
        self.apply_mutation(|cart| {
            cart.add(id, snapshot, quantity);
            true
        })
        .await;
    }

    /// Increments a line's quantity by one. No-op for an absent product.
    pub async fn increment(&self, id: ProductId) {
        self.apply_mutation(|cart| cart.increment(id)).await;
    }

    /// Decrements a line's quantity by one, removing the line at zero.
    /// No-op for an absent product.
    pub async fn decrement(&self, id: ProductId) {
        self.apply_mutation(|cart| cart.decrement(id)).await;
    }

    /// Sets a line's quantity; zero removes the line. No-op for an absent
    /// product.
    pub async fn set_quantity(&self, id: ProductId, quantity: u32) {
        self.apply_mutation(|cart| cart.set_quantity(id, quantity))
            .await;
    }

    /// Removes a line. Idempotent.
    pub async fn remove_item(&self, id: ProductId) {
        self.apply_mutation(|cart| cart.remove(id)).await;
    }

    /// Empties the cart and detaches any promo.
    pub async fn clear(&self) {
        self.apply_mutation(|cart| {
            let changed = !cart.is_empty();
            cart.clear();
            changed
        })
        .await;
    }

    /// Validates and attaches a promo code.
    ///
    /// Local failures (empty code, empty cart) are reported without a
    /// network call. A server rejection or an unreachable promotion
    /// service detaches any previously active discount before the error is
    /// returned; retrying is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoError`] describing why the code was not attached.
    #[tracing::instrument(
        name = "cart.engine.apply_promo_code",
        skip(self, code),
        fields(code = tracing::field::Empty),
        err
    )]
    pub async fn apply_promo_code(&self, code: &str) -> Result<AppliedDiscount, PromoError> {
        let code = code.trim();

        if code.is_empty() {
            return Err(PromoError::EmptyCode);
        }

        Span::current().record("code", code);

        let subtotal = self.state.lock().subtotal();

        if subtotal.is_zero() {
            return Err(PromoError::EmptyCart);
        }

        match self.discounts.validate(code, subtotal).await {
            Ok(validated) => {
                let applied =
                    AppliedDiscount::new(validated.code, validated.discount_amount, subtotal);

                self.state.lock().apply_discount(applied.clone());

                info!(code = applied.code(), amount = %applied.amount(), "promo code applied");

                Ok(applied)
            }
            Err(DiscountError::Rejected { message }) => {
                self.state.lock().clear_discount();

                Err(PromoError::Rejected(message.unwrap_or_else(|| {
                    "promo code was not accepted".to_string()
                })))
            }
            Err(error) => {
                self.state.lock().clear_discount();

                warn!(%error, "promotion validation unreachable");

                Err(PromoError::Unavailable)
            }
        }
    }

    /// Detaches the promo code and discount, if any. No network call.
    pub fn remove_promo_code(&self) {
        if self.state.lock().clear_discount() {
            debug!("promo code removed");
        }
    }

    /// Runs a reconciliation pass immediately, bypassing the throttle.
    ///
    /// Returns `None` when a pass is already in flight.
    pub async fn sync_now(&self) -> Option<SyncReport> {
        self.run_sync().await
    }

    /// Runs a reconciliation pass if the configured interval has elapsed
    /// since the last completed pass.
    pub async fn maybe_sync(&self) -> Option<SyncReport> {
        let due = {
            let last = self.last_sync.lock();
            last.map_or(true, |at| at.elapsed() >= self.config.sync_interval)
        };

        if !due {
            return None;
        }

        self.run_sync().await
    }

    /// The lines in display order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.state.lock().lines().to_vec()
    }

    /// Derived totals: subtotal, capped discount, payable total, unit
    /// count.
    pub fn totals(&self) -> CartTotals {
        self.state.lock().totals()
    }

    /// The active promo code, if any.
    pub fn promo_code(&self) -> Option<String> {
        self.state.lock().promo().code().map(str::to_string)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Applies one mutation atomically, persists the changed line list and
    /// re-validates the discount when the subtotal moved.
    async fn apply_mutation(&self, mutate: impl FnOnce(&mut Cart) -> bool) {
        let (changed, lines, subtotal_moved) = {
            let mut cart = self.state.lock();
            let before = cart.subtotal();
            let changed = mutate(&mut cart);
            let lines = if changed { cart.lines().to_vec() } else { Vec::new() };

            (changed, lines, cart.subtotal() != before)
        };

        if changed {
            self.persist(&lines).await;
        }

        if subtotal_moved {
            self.revalidate_discount().await;
        }
    }

    /// Re-validates an active discount against the current subtotal.
    ///
    /// An empty cart detaches the discount without a network call. A
    /// failed re-validation of any kind detaches it too; this is
    /// background reconciliation, so nothing is surfaced.
    async fn revalidate_discount(&self) {
        let pending = {
            let mut cart = self.state.lock();

            match cart.promo().applied() {
                None => None,
                Some(applied) => {
                    let subtotal = cart.subtotal();

                    if subtotal.is_zero() {
                        cart.clear_discount();
                        debug!("cart emptied; promo detached");
                        None
                    } else if applied.is_stale_for(subtotal) {
                        Some((applied.code().to_string(), subtotal))
                    } else {
                        None
                    }
                }
            }
        };

        let Some((code, subtotal)) = pending else {
            return;
        };

        debug!(code = %code, subtotal = %subtotal, "revalidating discount");

        match self.discounts.validate(&code, subtotal).await {
            Ok(validated) => {
                let mut cart = self.state.lock();

                // the promo may have been removed while the call was in
                // flight; never resurrect it
                if cart.promo().code() == Some(code.as_str()) {
                    cart.apply_discount(AppliedDiscount::new(
                        validated.code,
                        validated.discount_amount,
                        subtotal,
                    ));
                }
            }
            Err(error) => {
                self.state.lock().clear_discount();

                info!(code = %code, %error, "discount no longer valid; detached");
            }
        }
    }

    /// One reconciliation pass: fan out a lookup per distinct product in
    /// the cart, join them all, then merge the results by product id
    /// against current state. A pass already in flight suppresses this
    /// one.
    #[tracing::instrument(name = "cart.engine.sync", skip(self))]
    async fn run_sync(&self) -> Option<SyncReport> {
        if self.sync_in_flight.swap(true, Ordering::SeqCst) {
            debug!("reconciliation pass already in flight");
            return None;
        }

        let ids = self.state.lock().product_ids();

        let fetches = ids.into_iter().map(|id| {
            let catalog = Arc::clone(&self.catalog);
            async move { (id, catalog.get_product(id).await) }
        });

        let results = join_all(fetches).await;

        let (report, changed, subtotal_moved) = {
            let mut cart = self.state.lock();
            let before = cart.subtotal();
            let mut report = SyncReport::default();
            let mut changed = false;

            for (id, result) in results {
                match result {
                    Ok(snapshot) => {
                        if cart.refresh(id, snapshot) {
                            changed = true;
                            report.refreshed += 1;
                        }
                    }
                    Err(CatalogError::NotFound) => {
                        if cart.remove(id) {
                            changed = true;
                            report.dropped += 1;
                        }
                    }
                    Err(error) => {
                        report.failed += 1;
                        debug!(product_id = %id, %error, "lookup failed; keeping stale line");
                    }
                }
            }

            (report, changed, cart.subtotal() != before)
        };

        if changed {
            let lines = self.state.lock().lines().to_vec();
            self.persist(&lines).await;
        }

        if subtotal_moved {
            self.revalidate_discount().await;
        }

        *self.last_sync.lock() = Some(Instant::now());
        self.sync_in_flight.store(false, Ordering::SeqCst);

        if report.dropped > 0 || report.refreshed > 0 {
            info!(
                refreshed = report.refreshed,
                dropped = report.dropped,
                failed = report.failed,
                "reconciled cart against catalog"
            );
        }

        Some(report)
    }

    /// Serializes and writes the line list; failures are logged and the
    /// in-memory cart stays authoritative.
    async fn persist(&self, lines: &[CartLine]) {
        let blob = match records::encode_lines(lines) {
            Ok(blob) => blob,
            Err(error) => {
                warn!(%error, "failed to encode cart for persistence");
                return;
            }
        };

        if let Err(error) = self.storage.write(&self.config.storage_key, &blob).await {
            warn!(%error, "failed to persist cart");
        }
    }
}
