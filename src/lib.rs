// ============================================================================
// RaviMart - storefront state core
// ============================================================================
//
// - domain: catalog, identity, cart and order types with their rules
// - services: the commerce engine and notifications built on them
// - storefront: the application context wiring everything together
// - event_sourcing: aggregate and event log plumbing used by orders
// - storage, clock, config, metrics: injected infrastructure
//
// ============================================================================

pub mod clock;
pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;
pub mod services;
pub mod storage;
pub mod storefront;
pub mod utils;

pub use config::StoreConfig;
pub use storefront::{AdminOverview, CheckoutError, Storefront};
