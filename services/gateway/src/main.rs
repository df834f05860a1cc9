mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

use analytics::AnalyticsEngine;
use config::GatewayConfig;
use ingestion::{scheduler, DataGovClient, Refresher};
use persistence::TransactionStore;
use router::create_router;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting resale analytics gateway");

    let config = GatewayConfig::from_env()?;
    let bind_addr = config.bind_addr;

    // Lazy pool: an unreachable database degrades features, never startup
    let store = TransactionStore::connect_lazy(&config.database_url)?;
    if let Err(err) = store.init_schema().await {
        tracing::error!(
            error = %err,
            "Schema initialization failed; persistence will retry per operation"
        );
    }

    let engine = Arc::new(AnalyticsEngine::new());
    let source = Arc::new(DataGovClient::new(config.data_api_url.clone()));
    let refresher = Arc::new(
        Refresher::new(source, Arc::new(store.clone()), Arc::clone(&engine)).with_limits(
            ingestion::pipeline::PAGE_SIZE,
            ingestion::pipeline::MAX_RECORDS,
            config.cold_start_rows,
        ),
    );

    // Cache warm-up and the daily 02:00 SGT refresh
    scheduler::start(Arc::clone(&refresher));

    let state = AppState::new(engine, refresher, &store, config);
    let app = create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
