use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use satview_core::bitcoin::providers::{BitcoinPriceProvider, CoinGeckoProvider};
use satview_core::bitcoin::{
    BitcoinPriceRepository, BitcoinPriceRepositoryTrait, BitcoinPriceService,
    BitcoinPriceServiceTrait, PriceCache,
};
use satview_core::db;

use crate::config::Config;

pub struct AppState {
    pub price_service: Arc<dyn BitcoinPriceServiceTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let repository: Option<Arc<dyn BitcoinPriceRepositoryTrait>> = match &config.db_path {
        Some(db_path) => {
            let db_path = db::init(db_path)?;
            tracing::info!("Database path in use: {}", db_path);
            let pool = db::create_pool(&db_path)?;
            db::run_migrations(&pool)?;
            Some(Arc::new(BitcoinPriceRepository::new(pool)))
        }
        None => {
            tracing::info!("Persistence disabled, running cache-only");
            None
        }
    };

    let provider: Arc<dyn BitcoinPriceProvider> =
        Arc::new(CoinGeckoProvider::with_base_url(&config.coingecko_base_url));

    // The cache lives for the lifetime of the process and nothing else;
    // it is constructed here and injected, never reached through globals.
    let cache = Arc::new(PriceCache::new());
    let price_service = Arc::new(BitcoinPriceService::new(provider, repository, cache));

    Ok(Arc::new(AppState { price_service }))
}
