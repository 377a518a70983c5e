//! furnish - Furniture storefront session engine.
//!
//! Persistent cart and recently-viewed stores mirrored to named durable
//! slots, a static product catalog with in-memory search, and a linear
//! checkout wizard with coupon validation.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
