//! Campaign configuration loading and validation

pub mod loader;
pub mod validation;

pub use loader::{LoadReport, load_campaign_set, load_from_file};
pub use validation::{ConfigError, ConfigResult, EntryKind};
