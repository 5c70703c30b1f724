//! Loyalty accrual and product-group scoping
//!
//! Independent from the discount pass in `pricing/`: accrual reads the
//! evaluated lines, group resolution feeds the campaign matchers.

pub mod groups;
pub mod loyalty;

pub use groups::{Catalog, GroupMembers, resolve};
pub use loyalty::{AccrualPolicy, Exclusion, accrue, accrue_cart, line_points, resolve_policy};
