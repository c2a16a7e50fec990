//! Marketplace Service Module
//!
//! Multi-tenant marketplace: users with one store each, a category and
//! product catalog with photos, shipping addresses, and orders that
//! decrement stock atomically and record product snapshots.

// Public exports
pub mod contract;
pub use contract::{error::MarketplaceError, AuthContext};

pub mod module;
pub use module::{MarketplaceModule, MarketplaceServices};

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
