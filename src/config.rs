//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`FURNISH_*`)
//! 2. Config file (`~/.furnish/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Recently-viewed tracker configuration.
    pub recently_viewed: RecentlyViewedConfig,

    /// Checkout configuration.
    pub checkout: CheckoutConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the furnish home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_furnish_home(),
        }
    }
}

/// Recently-viewed tracker configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecentlyViewedConfig {
    /// Maximum number of entries kept before eviction.
    pub capacity: usize,
}

impl Default for RecentlyViewedConfig {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Subtotal at or above which standard delivery is free.
    pub free_delivery_threshold: f64,

    /// Tax rate applied to the discounted subtotal.
    pub tax_rate: f64,

    /// Simulated coupon lookup delay in milliseconds.
    pub coupon_delay_ms: u64,

    /// Simulated order submission delay in milliseconds.
    pub order_delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: 5000.0,
            tax_rate: 0.05,
            coupon_delay_ms: 1000,
            order_delay_ms: 3000,
        }
    }
}

/// Get the default furnish home directory.
fn default_furnish_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".furnish"), |h| h.join(".furnish"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    // Try to load config file
    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    // Override with environment variables
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("FURNISH_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("FURNISH_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_furnish_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    // Storage path
    if let Ok(path) = env::var("FURNISH_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("FURNISH_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    // Recently viewed
    if let Ok(val) = env::var("FURNISH_RECENT_CAPACITY") {
        if let Ok(capacity) = val.parse() {
            config.recently_viewed.capacity = capacity;
        }
    }

    // Checkout
    if let Ok(val) = env::var("FURNISH_FREE_DELIVERY_THRESHOLD") {
        if let Ok(threshold) = val.parse() {
            config.checkout.free_delivery_threshold = threshold;
        }
    }

    if let Ok(val) = env::var("FURNISH_COUPON_DELAY_MS") {
        if let Ok(ms) = val.parse() {
            config.checkout.coupon_delay_ms = ms;
        }
    }

    if let Ok(val) = env::var("FURNISH_ORDER_DELAY_MS") {
        if let Ok(ms) = val.parse() {
            config.checkout.order_delay_ms = ms;
        }
    }
}
