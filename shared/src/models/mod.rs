//! Data models
//!
//! Shared between promo-engine, promo-client and the authoritative service.
//! Wire format is camelCase JSON.

pub mod campaign;
pub mod campaign_set;
pub mod cart;
pub mod loyalty_rule;
pub mod product_group;

// Re-exports
pub use campaign::*;
pub use campaign_set::*;
pub use cart::*;
pub use loyalty_rule::*;
pub use product_group::*;
