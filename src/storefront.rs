use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::clock::{self, Cancelled, Clock, SystemClock};
use crate::config::StoreConfig;
use crate::domain::catalog::{filter_products, Catalog, CatalogError, FilterSpec, Product, ProductDraft, ProductId};
use crate::domain::identity::{CredentialCheck, FixedAdminCredential, SessionStore};
use crate::domain::order::{Order, OrderError, OrderId, OrderSummary, PaymentMethod, ShippingAddress};
use crate::metrics::StoreMetrics;
use crate::services::CommerceEngine;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

// ============================================================================
// Storefront - the application context
// ============================================================================
//
// Built once at startup and passed by `&mut` to whatever drives it. Owns
// the catalog, the session store and the commerce engine; every collaborator
// with side effects (storage, clock, admin credential) is injected.
//
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CheckoutError {
    #[error("Payment cancelled before completion")]
    Cancelled,

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl From<Cancelled> for CheckoutError {
    fn from(_: Cancelled) -> Self {
        CheckoutError::Cancelled
    }
}

/// Figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_revenue: Decimal,
    pub orders_placed: u64,
    pub add_to_cart_count: u64,
    pub return_requests: usize,
    pub customer_count: usize,
    pub product_count: usize,
    pub low_stock: Vec<Product>,
}

pub struct Storefront {
    config: StoreConfig,
    clock: Arc<dyn Clock>,
    metrics: Arc<StoreMetrics>,
    catalog: Catalog,
    sessions: SessionStore,
    commerce: CommerceEngine,
}

impl Storefront {
    pub fn open(
        config: StoreConfig,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        credentials: Arc<dyn CredentialCheck>,
    ) -> anyhow::Result<Self> {
        let metrics = Arc::new(StoreMetrics::new()?);

        let sessions = SessionStore::open(
            storage,
            clock.clone(),
            credentials,
            metrics.clone(),
            config.auth_latency(),
        )?;
        let commerce = CommerceEngine::new(clock.clone(), metrics.clone(), config.notification_ttl());

        let catalog = Catalog::seeded();

        let backend = if config.storage_dir.is_some() { "file" } else { "memory" };
        tracing::info!(storage = backend, products = catalog.len(), "Storefront opened");

        Ok(Self {
            config,
            clock,
            metrics,
            catalog,
            sessions,
            commerce,
        })
    }

    /// Wall clock, the demo admin credential, and storage chosen by
    /// `storage_dir`.
    pub fn from_config(config: StoreConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStore::open(dir)?),
            None => Arc::new(MemoryStore::new()),
        };

        Self::open(
            config,
            storage,
            Arc::new(SystemClock),
            Arc::new(FixedAdminCredential::default()),
        )
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionStore {
        &mut self.sessions
    }

    pub fn commerce(&self) -> &CommerceEngine {
        &self.commerce
    }

    pub fn commerce_mut(&mut self) -> &mut CommerceEngine {
        &mut self.commerce
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub fn browse(&self, spec: &FilterSpec) -> Vec<Product> {
        filter_products(self.catalog.products(), spec)
    }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let product = draft.build()?;
        Ok(self.catalog.add(product)?.clone())
    }

    pub fn remove_product(&mut self, id: &ProductId) {
        self.catalog.remove(id);
    }

    /// Add a catalog product to the cart by id. Unknown ids are ignored.
    pub fn add_to_cart(&mut self, id: &ProductId) -> bool {
        match self.catalog.get(id) {
            Some(product) => {
                self.commerce.add_to_cart(product);
                true
            }
            None => {
                tracing::warn!(product_id = %id, "Add to cart ignored, product not in catalog");
                false
            }
        }
    }

    // ========================================================================
    // Checkout
    // ========================================================================

    /// Wait out the payment latency, then commit the cart for whoever is
    /// signed in at that moment. A cancelled payment leaves the cart as is.
    pub async fn checkout(
        &mut self,
        payment_method: PaymentMethod,
        shipping: Option<ShippingAddress>,
        cancel: &CancellationToken,
    ) -> Result<Order, CheckoutError> {
        if !self.sessions.is_authenticated() {
            return Err(OrderError::NotAuthenticated.into());
        }

        tracing::debug!(payment = ?payment_method, "Processing payment");
        clock::delay(self.clock.as_ref(), self.config.payment_latency(), cancel).await?;

        let order = self
            .commerce
            .place_order(self.sessions.current(), payment_method, shipping)?;
        Ok(order)
    }

    /// Summary of the live cart, as shown before payment.
    pub fn cart_summary(&self) -> OrderSummary {
        OrderSummary::for_items(self.commerce.cart().lines(), self.config.tax_rate())
    }

    pub fn order_summary(&self, order_id: &OrderId) -> Option<OrderSummary> {
        self.commerce
            .order(order_id)
            .map(|order| OrderSummary::for_order(order, self.config.tax_rate()))
    }

    // ========================================================================
    // Signed-in customer
    // ========================================================================

    pub fn my_orders(&self) -> Vec<&Order> {
        match self.sessions.current() {
            Some(identity) => self.commerce.orders_for(&identity.id),
            None => Vec::new(),
        }
    }

    pub fn request_return(&mut self, order_id: &OrderId) -> Result<(), OrderError> {
        let identity = self.sessions.current().ok_or(OrderError::NotAuthenticated)?;
        self.commerce.request_return(order_id, identity)
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub fn admin_overview(&self) -> AdminOverview {
        let stats = self.commerce.stats();
        AdminOverview {
            total_revenue: stats.total_revenue,
            orders_placed: stats.orders_placed_count,
            add_to_cart_count: stats.add_to_cart_count,
            return_requests: self.commerce.return_request_count(),
            customer_count: self.sessions.customers().count(),
            product_count: self.catalog.len(),
            low_stock: self
                .catalog
                .low_stock(self.config.low_stock_threshold)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
