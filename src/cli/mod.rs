//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod products;
pub mod search;
pub mod viewed;
