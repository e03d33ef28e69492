use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::routing::get;
use roadies_chat::{config::ServerConfig, init_tracing, routes, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::from_env()?;

    let state = Arc::new(AppState::new(config.session_ttl));

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(60));
        loop {
            tick.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                info!(removed, "purged idle sessions");
            }
        }
    });

    let app = routes::create_router()
        .route("/", get(|| async { "Roadies chat backend" }))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "roadies chat backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
