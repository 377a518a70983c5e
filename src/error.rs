//! Error types for furnish.

use std::io;
use thiserror::Error;

/// Result type alias for furnish operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in furnish operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Product id or slug not present in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Address, payment, or delivery selection not in the fixture data.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Coupon validation failure (user-facing).
    #[error(transparent)]
    Coupon(#[from] crate::core::checkout::CouponError),

    /// Checkout wizard guard refused to advance.
    #[error(transparent)]
    Wizard(#[from] crate::core::checkout::StepBlocked),
}
