//! CampaignSet loader with partial-failure tolerance
//!
//! The document is parsed entry by entry: a campaign, loyalty rule or
//! product group that fails to deserialize or validate is dropped and
//! reported, the rest of the set stays usable. Only a document that is not
//! a JSON object is rejected as a whole.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::models::{Campaign, CampaignSet, EngineSettings, LoyaltyRule, ProductGroup};
use std::collections::HashSet;
use std::path::Path;

use super::validation::{
    ConfigError, ConfigResult, EntryKind, validate_campaign, validate_loyalty_rule,
    validate_product_group, validate_settings,
};

/// Loaded set plus every entry that was dropped
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub set: CampaignSet,
    pub rejected: Vec<ConfigError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Load a CampaignSet from a JSON document
pub fn load_campaign_set(json: &str) -> ConfigResult<LoadReport> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| ConfigError::Document(e.to_string()))?;
    let Value::Object(root) = document else {
        return Err(ConfigError::Document("expected a JSON object".into()));
    };

    let mut rejected = Vec::new();

    let campaigns = load_entries::<Campaign>(
        &root,
        "campaigns",
        EntryKind::Campaign,
        |c| &c.id,
        validate_campaign,
        &mut rejected,
    );
    let loyalty_rules = load_entries::<LoyaltyRule>(
        &root,
        "loyaltyRules",
        EntryKind::LoyaltyRule,
        |r| &r.id,
        validate_loyalty_rule,
        &mut rejected,
    );
    let product_groups = load_entries::<ProductGroup>(
        &root,
        "productGroups",
        EntryKind::ProductGroup,
        |g| &g.id,
        validate_product_group,
        &mut rejected,
    );
    let settings = load_settings(&root, &mut rejected);

    for error in &rejected {
        tracing::warn!(code = %error.code(), "Dropped configuration entry: {}", error);
    }
    tracing::info!(
        campaigns = campaigns.len(),
        loyalty_rules = loyalty_rules.len(),
        product_groups = product_groups.len(),
        rejected = rejected.len(),
        "Campaign set loaded"
    );

    Ok(LoadReport {
        set: CampaignSet {
            campaigns,
            loyalty_rules,
            product_groups,
            settings,
        },
        rejected,
    })
}

/// Load a CampaignSet from a JSON file
pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<LoadReport> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_campaign_set(&json)
}

/// Entry label used in errors: its id when present, else its index
fn entry_label(value: &Value, index: usize) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index))
}

fn load_entries<T: DeserializeOwned>(
    root: &Map<String, Value>,
    key: &str,
    kind: EntryKind,
    id_of: fn(&T) -> &String,
    validate: fn(&T, usize) -> ConfigResult<()>,
    rejected: &mut Vec<ConfigError>,
) -> Vec<T> {
    let items = match root.get(key) {
        None | Some(Value::Null) => return vec![],
        Some(Value::Array(items)) => items,
        Some(_) => {
            rejected.push(ConfigError::Malformed {
                kind,
                entry: key.to_string(),
                reason: "expected an array".into(),
            });
            return vec![];
        }
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        let entry: T = match serde_json::from_value(raw.clone()) {
            Ok(entry) => entry,
            Err(e) => {
                rejected.push(ConfigError::Malformed {
                    kind,
                    entry: entry_label(raw, index),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if let Err(e) = validate(&entry, index) {
            rejected.push(e);
            continue;
        }
        if !seen.insert(id_of(&entry).clone()) {
            rejected.push(ConfigError::DuplicateId {
                kind,
                entry: id_of(&entry).clone(),
            });
            continue;
        }
        entries.push(entry);
    }
    entries
}

fn load_settings(root: &Map<String, Value>, rejected: &mut Vec<ConfigError>) -> EngineSettings {
    let Some(raw) = root.get("settings").filter(|v| !v.is_null()) else {
        return EngineSettings::default();
    };
    let parsed = serde_json::from_value::<EngineSettings>(raw.clone())
        .map_err(|e| ConfigError::Malformed {
            kind: EntryKind::Settings,
            entry: "settings".into(),
            reason: e.to_string(),
        })
        .and_then(|settings| validate_settings(&settings).map(|_| settings));

    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            rejected.push(e);
            EngineSettings::default()
        }
    }
}
