//! Campaign set reload
//!
//! Re-reads `CAMPAIGNS_PATH` and swaps the active set. Entries that fail
//! validation are dropped and listed in the response.

use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use shared::{AppError, AppResult};

use crate::campaigns::load_from_file;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/campaigns/reload", post(reload))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    campaigns: usize,
    loyalty_rules: usize,
    product_groups: usize,
    rejected: Vec<String>,
}

async fn reload(State(state): State<ServerState>) -> AppResult<Json<ReloadResponse>> {
    let report = load_from_file(&state.config.campaigns_path)
        .map_err(|e| AppError::with_message(e.code(), e.to_string()))?;

    let response = ReloadResponse {
        campaigns: report.set.campaigns.len(),
        loyalty_rules: report.set.loyalty_rules.len(),
        product_groups: report.set.product_groups.len(),
        rejected: report.rejected.iter().map(ToString::to_string).collect(),
    };
    state.replace_campaigns(report.set);
    tracing::info!(campaigns = response.campaigns, "Campaign set reloaded");

    Ok(Json(response))
}
