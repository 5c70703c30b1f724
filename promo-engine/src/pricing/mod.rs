//! Campaign Evaluation Module
//!
//! Pure evaluation pipeline: campaign matching, set-price effects with
//! stacking, then loyalty accrual on the discounted cart.

mod calculator;
mod context;
mod engine;
mod evaluator;
pub mod matcher;

#[cfg(test)]
mod tests;

pub use calculator::*;
pub use context::*;
pub use engine::*;
pub use evaluator::*;
pub use matcher::*;
