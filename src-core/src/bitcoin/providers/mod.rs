pub mod coingecko_provider;
pub mod models;

use async_trait::async_trait;

use super::bitcoin_errors::PriceError;
use super::bitcoin_model::HistoricalPoint;
use models::{MarketDetail, SimplePrice};

pub use coingecko_provider::CoinGeckoProvider;

/// Upstream market data source for the service layer.
#[async_trait]
pub trait BitcoinPriceProvider: Send + Sync {
    /// Current simple price and market stats.
    async fn fetch_simple_price(&self) -> Result<SimplePrice, PriceError>;

    /// Extended market data (all-time high/low and their dates).
    async fn fetch_market_detail(&self) -> Result<MarketDetail, PriceError>;

    /// Daily historical series for the given (already clamped) day-count,
    /// chronological ascending.
    async fn fetch_market_chart(&self, days: i64) -> Result<Vec<HistoricalPoint>, PriceError>;
}
