use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::bitcoin_errors::Result;
use super::bitcoin_model::{BitcoinPriceRecord, HistoricalPoint, PriceSnapshot, Timeframe};

#[async_trait]
pub trait BitcoinPriceServiceTrait: Send + Sync {
    /// Current normalized price snapshot, served from cache, store, or upstream.
    async fn get_price(&self) -> Result<PriceSnapshot>;

    /// Historical series for the requested day-count (defaults to 365),
    /// clamped to the supported lookback window, ascending by timestamp.
    async fn get_history(&self, days: Option<i64>) -> Result<Vec<HistoricalPoint>>;
}

/// Durable store contract. All calls are issued best-effort by the service;
/// a failing store never aborts the primary response.
pub trait BitcoinPriceRepositoryTrait: Send + Sync {
    fn save_snapshot(&self, snapshot: &PriceSnapshot) -> Result<BitcoinPriceRecord>;
    fn get_latest_snapshot(&self) -> Result<Option<BitcoinPriceRecord>>;
    fn save_historical_points(
        &self,
        points: &[HistoricalPoint],
        timeframe: Timeframe,
    ) -> Result<()>;
    fn get_historical_points(
        &self,
        timeframe: Timeframe,
        not_older_than: Option<NaiveDateTime>,
    ) -> Result<Vec<HistoricalPoint>>;
    fn purge_historical_points(&self, older_than: NaiveDateTime) -> Result<usize>;
}
