use anyhow::Context;
use promo_engine::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env), configuration, logging
    let config = setup_environment();
    tracing::info!("Promo evaluation service starting...");

    // 2. Campaign set
    let state = ServerState::initialize(config.clone())
        .with_context(|| format!("failed to load campaigns from {}", config.campaigns_path))?;

    // 3. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
