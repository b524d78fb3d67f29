use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Store Configuration
// ============================================================================
//
// Layered: built-in defaults → optional YAML file → RAVIMART__* env vars.
// Example: RAVIMART__AUTH_LATENCY_MS=0 disables the simulated login delay.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Simulated round-trip for login and signup.
    pub auth_latency_ms: u64,
    /// Simulated payment processing before an order is committed.
    pub payment_latency_ms: u64,
    /// How long a notification stays visible.
    pub notification_ttl_ms: u64,
    /// Products with stock strictly below this are reported as low stock.
    pub low_stock_threshold: u32,
    /// Tax applied on top of the order subtotal, in whole percent.
    pub tax_percent: u32,
    /// Directory for persisted session state. `None` keeps it in memory.
    pub storage_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            auth_latency_ms: 800,
            payment_latency_ms: 2500,
            notification_ttl_ms: 3000,
            low_stock_threshold: 20,
            tax_percent: 18,
            storage_dir: None,
        }
    }
}

impl StoreConfig {
    pub const ENV_PREFIX: &'static str = "RAVIMART__";

    /// Load with layered sources. A missing YAML file is not an error.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(StoreConfig::default()))
            .merge(Yaml::file(config_path.as_ref()))
            .merge(Env::prefixed(Self::ENV_PREFIX));

        figment
            .extract()
            .with_context(|| "Failed to extract store config from figment".to_string())
    }

    /// Zero latencies, for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            auth_latency_ms: 0,
            payment_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    pub fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// `tax_percent` as a fraction, e.g. 18 → 0.18.
    pub fn tax_rate(&self) -> Decimal {
        Decimal::new(i64::from(self.tax_percent), 2)
    }
}
