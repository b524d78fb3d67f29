use std::env;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ravimart::domain::catalog::{Category, FilterSpec, ProductId};
use ravimart::domain::identity::{ProfileUpdate, Role};
use ravimart::domain::order::{OrderStatus, PaymentMethod};
use ravimart::{StoreConfig, Storefront};

const DEFAULT_CONFIG_PATH: &str = "ravimart.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, crate at DEBUG; override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ravimart=debug")),
        )
        .init();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = StoreConfig::load_layered(&config_path)?;
    tracing::info!(config_path = %config_path, ?config, "Configuration loaded");

    // Ctrl-C abandons whichever simulated round-trip is in flight
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling");
            trigger.cancel();
        }
    });

    let mut store = Storefront::from_config(config)?;

    // === 1. Browse ===
    let tools = FilterSpec::default()
        .with_category(Category::Tools)
        .with_min_rating(4.5);
    for product in store.browse(&tools) {
        tracing::info!(product_id = %product.id, name = %product.name, price = %product.price, "Tool");
    }
    let hits = store.browse(&FilterSpec::default().with_search("bosch drill"));
    tracing::info!(count = hits.len(), "Search 'bosch drill'");

    // === 2. Sign in as a customer and check out ===
    let rahul = store
        .sessions_mut()
        .login("rahul@example.com", "password", Role::Customer, &cancel)
        .await?;
    tracing::info!(name = %rahul.name, "Signed in");

    store.add_to_cart(&ProductId::new("1"));
    store.add_to_cart(&ProductId::new("1"));
    store.add_to_cart(&ProductId::new("3"));
    store.commerce_mut().update_quantity(&ProductId::new("3"), 4);

    let summary = store.cart_summary();
    tracing::info!(subtotal = %summary.subtotal, tax = %summary.tax, total = %summary.total, "Cart");

    let order = store.checkout(PaymentMethod::Upi, None, &cancel).await?;
    tracing::info!(order_id = %order.id, total = %order.total, "Checkout complete");

    store.sessions_mut().update_profile(ProfileUpdate {
        phone: Some("9123456780".to_string()),
        ..ProfileUpdate::default()
    })?;
    store.sessions_mut().logout()?;

    // === 3. Admin moves the order along ===
    store
        .sessions_mut()
        .login("admin@ravimart.com", "admin123", Role::Admin, &cancel)
        .await?;
    for status in [OrderStatus::Processing, OrderStatus::Shipped, OrderStatus::Delivered] {
        store.commerce_mut().update_order_status(&order.id, status)?;
    }
    store.sessions_mut().logout()?;

    // === 4. Customer asks for a return ===
    store
        .sessions_mut()
        .login("rahul@example.com", "password", Role::Customer, &cancel)
        .await?;
    store.request_return(&order.id)?;

    for event in store.commerce().history(&order.id) {
        tracing::info!(seq = event.sequence_number, event_type = %event.event_type, "Order history");
    }

    let overview = store.admin_overview();
    tracing::info!(
        revenue = %overview.total_revenue,
        orders = overview.orders_placed,
        returns = overview.return_requests,
        low_stock = overview.low_stock.len(),
        "Admin overview"
    );

    tracing::info!("Metrics:\n{}", store.metrics().render()?);
    Ok(())
}
