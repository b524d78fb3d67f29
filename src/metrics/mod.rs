use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for the storefront core
// ============================================================================
//
// Mirrors the storefront's running counters into a Prometheus registry:
// - Cart additions
// - Orders placed and revenue
// - Order status changes by target status
// - Login attempts by role and outcome
//
// There is no scrape endpoint; callers render the text exposition on demand.
// ============================================================================

pub struct StoreMetrics {
    registry: Registry,

    pub cart_additions_total: IntCounter,
    pub orders_placed_total: IntCounter,
    pub revenue_total: Gauge,
    pub order_status_changes_total: IntCounterVec,
    pub login_attempts_total: IntCounterVec,
}

impl StoreMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let cart_additions_total = IntCounter::new(
            "cart_additions_total",
            "Total add-to-cart actions",
        )?;
        registry.register(Box::new(cart_additions_total.clone()))?;

        let orders_placed_total = IntCounter::new(
            "orders_placed_total",
            "Total orders committed at checkout",
        )?;
        registry.register(Box::new(orders_placed_total.clone()))?;

        let revenue_total = Gauge::new(
            "revenue_total",
            "Cumulative pre-tax order revenue",
        )?;
        registry.register(Box::new(revenue_total.clone()))?;

        let order_status_changes_total = IntCounterVec::new(
            Opts::new("order_status_changes_total", "Order status changes by new status"),
            &["status"],
        )?;
        registry.register(Box::new(order_status_changes_total.clone()))?;

        let login_attempts_total = IntCounterVec::new(
            Opts::new("login_attempts_total", "Login attempts by role intent and outcome"),
            &["role", "outcome"],
        )?;
        registry.register(Box::new(login_attempts_total.clone()))?;

        Ok(Self {
            registry,
            cart_additions_total,
            orders_placed_total,
            revenue_total,
            order_status_changes_total,
            login_attempts_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_cart_addition(&self) {
        self.cart_additions_total.inc();
    }

    pub fn record_order_placed(&self, total: f64) {
        self.orders_placed_total.inc();
        self.revenue_total.add(total);
    }

    pub fn record_status_change(&self, status: &str) {
        self.order_status_changes_total.with_label_values(&[status]).inc();
    }

    pub fn record_login(&self, role: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.login_attempts_total.with_label_values(&[role, outcome]).inc();
    }

    /// Prometheus text exposition of everything registered.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
