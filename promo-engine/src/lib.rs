//! Promotions and loyalty evaluation engine
//!
//! # Module layout
//!
//! ```text
//! promo-engine/src/
//! ├── pricing/      # rule evaluator, matchers, stacking, pipeline entry
//! ├── marketing/    # loyalty accrual, product-group resolution
//! ├── campaigns/    # CampaignSet loading and validation
//! ├── money.rs      # points rounding, cart line validation
//! ├── core/         # config, state, server
//! ├── api/          # HTTP routes (/evaluate, /health)
//! └── utils/        # logging
//! ```
//!
//! The evaluation pipeline is pure: the same [`evaluate`] call backs
//! client-side previews and the authoritative service.

pub mod api;
pub mod campaigns;
pub mod core;
pub mod marketing;
pub mod money;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use campaigns::{ConfigError, LoadReport, load_campaign_set, load_from_file};
pub use core::{Config, Server, ServerState};
pub use marketing::{Catalog, GroupMembers};
pub use pricing::{EvaluationContext, evaluate, evaluate_with_catalog};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load `.env` (if present), read the configuration and initialize logging
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
