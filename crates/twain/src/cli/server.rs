//! `twain serve`.

use tracing::info;
use twain::{AppState, TwainConfig, TwainResult, build_store, router, serve};

/// Build every service from configuration and serve until Ctrl-C.
pub async fn run_server(config: &TwainConfig, bind: Option<String>) -> TwainResult<()> {
    let store = build_store(&config.store)?;
    let state = AppState::from_config(config, store)?;
    let addr = bind.unwrap_or_else(|| config.server.bind.clone());

    info!(
        environment = %config.server.environment,
        openai_key_set = config.openai_key_set(),
        storage_bucket_set = config.storage_bucket_set(),
        "Starting twain service"
    );
    serve(&addr, router(state)).await?;
    Ok(())
}
