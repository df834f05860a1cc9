use std::sync::Arc;
use std::time::Instant;

use analytics::AnalyticsEngine;
use ingestion::Refresher;
use persistence::{ProfileStore, TransactionStore, WatchlistStore};

use crate::config::GatewayConfig;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
    pub refresher: Arc<Refresher>,
    pub profiles: ProfileStore,
    pub watchlist: WatchlistStore,
    pub config: Arc<GatewayConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        engine: Arc<AnalyticsEngine>,
        refresher: Arc<Refresher>,
        store: &TransactionStore,
        config: GatewayConfig,
    ) -> Self {
        Self {
            engine,
            refresher,
            profiles: ProfileStore::new(store.pool().clone()),
            watchlist: WatchlistStore::new(store.pool().clone()),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
