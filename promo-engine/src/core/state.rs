use parking_lot::RwLock;
use shared::models::CampaignSet;
use std::sync::Arc;

use crate::campaigns::load_from_file;
use crate::core::{Config, Result};
use crate::pricing::EvaluationContext;

/// Shared state of the evaluation service
///
/// Cheap to clone: the campaign set sits behind an `Arc<RwLock<_>>` and is
/// copied out per request, so evaluations never hold the lock.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    campaigns: Arc<RwLock<CampaignSet>>,
}

impl ServerState {
    pub fn new(config: Config, campaigns: CampaignSet) -> Self {
        Self {
            config: Arc::new(config),
            campaigns: Arc::new(RwLock::new(campaigns)),
        }
    }

    /// Load the campaign set from `config.campaigns_path`.
    ///
    /// Invalid entries are dropped (and logged by the loader); an
    /// unreadable or non-object document is an error.
    pub fn initialize(config: Config) -> Result<Self> {
        let report = load_from_file(&config.campaigns_path)?;
        if !report.is_clean() {
            tracing::warn!(
                rejected = report.rejected.len(),
                path = %config.campaigns_path,
                "Campaign set loaded with rejected entries"
            );
        }
        Ok(Self::new(config, report.set))
    }

    /// Snapshot of the current campaign set
    pub fn campaign_set(&self) -> CampaignSet {
        self.campaigns.read().clone()
    }

    /// Number of configured campaigns
    pub fn campaign_count(&self) -> usize {
        self.campaigns.read().campaigns.len()
    }

    /// Replace the campaign set; in-flight evaluations keep their snapshot
    pub fn replace_campaigns(&self, set: CampaignSet) {
        *self.campaigns.write() = set;
    }

    /// Evaluation context for "now" in the business timezone
    pub fn evaluation_context(&self) -> EvaluationContext {
        EvaluationContext::now_in(self.config.business_tz)
    }
}
