use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use log::warn;
use std::sync::Arc;
use std::time::Duration;

use super::bitcoin_constants::{
    history_cache_key, DEFAULT_HISTORY_DAYS, FALLBACK_ATH, FALLBACK_ATH_DATE, FALLBACK_ATL,
    FALLBACK_ATL_DATE, HISTORY_CACHE_TTL, HISTORY_RETENTION, MAX_HISTORY_DAYS, MIN_HISTORY_DAYS,
    PRICE_CACHE_KEY, PRICE_CACHE_TTL,
};
use super::bitcoin_errors::{PriceError, Result};
use super::bitcoin_model::{HistoricalPoint, PriceSnapshot, Timeframe};
use super::bitcoin_traits::{BitcoinPriceRepositoryTrait, BitcoinPriceServiceTrait};
use super::cache::PriceCache;
use super::providers::models::{MarketDetail, SimplePrice};
use super::providers::BitcoinPriceProvider;

/// Result of a best-effort persistence side effect. The primary operation
/// is never failed because of it; callers log `Failed` and move on.
#[derive(Debug)]
pub enum PersistOutcome {
    Persisted,
    /// No durable store is configured.
    Skipped,
    Failed(PriceError),
}

/// Orchestrates the two read paths over cache, durable store, and upstream.
///
/// The fallback chain for the current price is: fresh cache, fresh persisted
/// snapshot, upstream fetch; and on upstream rate limiting only: latest
/// persisted snapshot, then stale cache. Historical series use the same
/// shape without the persisted-snapshot legs.
pub struct BitcoinPriceService {
    provider: Arc<dyn BitcoinPriceProvider>,
    repository: Option<Arc<dyn BitcoinPriceRepositoryTrait>>,
    cache: Arc<PriceCache>,
    price_max_age: Duration,
    history_max_age: Duration,
}

impl BitcoinPriceService {
    pub fn new(
        provider: Arc<dyn BitcoinPriceProvider>,
        repository: Option<Arc<dyn BitcoinPriceRepositoryTrait>>,
        cache: Arc<PriceCache>,
    ) -> Self {
        Self {
            provider,
            repository,
            cache,
            price_max_age: PRICE_CACHE_TTL,
            history_max_age: HISTORY_CACHE_TTL,
        }
    }

    /// Override the freshness windows (shorter windows in tests).
    pub fn with_max_ages(mut self, price_max_age: Duration, history_max_age: Duration) -> Self {
        self.price_max_age = price_max_age;
        self.history_max_age = history_max_age;
        self
    }

    /// A snapshot some other process persisted within the price freshness
    /// window; saves an upstream round-trip. Read failures are treated as
    /// "nothing there".
    fn recent_persisted_snapshot(&self) -> Option<PriceSnapshot> {
        let repository = self.repository.as_ref()?;
        let record = match repository.get_latest_snapshot() {
            Ok(record) => record?,
            Err(e) => {
                warn!("Failed to read latest persisted snapshot: {}", e);
                return None;
            }
        };

        let max_age = ChronoDuration::from_std(self.price_max_age)
            .unwrap_or_else(|_| ChronoDuration::zero());
        let age = Utc::now().naive_utc() - record.timestamp;
        if age < max_age {
            Some(record.snapshot)
        } else {
            None
        }
    }

    /// Degraded path taken only on an upstream 429: latest persisted
    /// snapshot regardless of age, then a stale cache entry.
    fn rate_limited_price_fallback(&self) -> Result<PriceSnapshot> {
        if let Some(repository) = &self.repository {
            match repository.get_latest_snapshot() {
                Ok(Some(record)) => return Ok(record.snapshot),
                Ok(None) => {}
                Err(e) => warn!("Persisted snapshot unavailable during rate limit: {}", e),
            }
        }

        self.cache
            .snapshot
            .peek(PRICE_CACHE_KEY)
            .ok_or(PriceError::RateLimitExceeded)
    }

    fn persist_snapshot(&self, snapshot: &PriceSnapshot) -> PersistOutcome {
        let Some(repository) = &self.repository else {
            return PersistOutcome::Skipped;
        };

        match repository.save_snapshot(snapshot) {
            Ok(_) => PersistOutcome::Persisted,
            Err(e) => PersistOutcome::Failed(e),
        }
    }

    fn persist_history(&self, points: &[HistoricalPoint], timeframe: Timeframe) -> PersistOutcome {
        let Some(repository) = &self.repository else {
            return PersistOutcome::Skipped;
        };

        if let Err(e) = repository.save_historical_points(points, timeframe) {
            return PersistOutcome::Failed(e);
        }

        let retention = ChronoDuration::from_std(HISTORY_RETENTION)
            .unwrap_or_else(|_| ChronoDuration::zero());
        if let Err(e) = repository.purge_historical_points(Utc::now().naive_utc() - retention) {
            warn!("Failed to purge old historical rows: {}", e);
        }

        PersistOutcome::Persisted
    }
}

fn build_snapshot(simple: SimplePrice, detail: MarketDetail) -> PriceSnapshot {
    PriceSnapshot {
        price: simple.price,
        market_cap: simple.market_cap,
        volume_24h: simple.volume_24h,
        change_24h: simple.change_24h,
        ath: detail.ath.unwrap_or(FALLBACK_ATH),
        atl: detail.atl.unwrap_or(FALLBACK_ATL),
        ath_date: detail
            .ath_date
            .unwrap_or_else(|| FALLBACK_ATH_DATE.to_string()),
        atl_date: detail
            .atl_date
            .unwrap_or_else(|| FALLBACK_ATL_DATE.to_string()),
    }
}

#[async_trait]
impl BitcoinPriceServiceTrait for BitcoinPriceService {
    async fn get_price(&self) -> Result<PriceSnapshot> {
        // Common path: a fresh cache hit adds no network latency.
        if let Some(snapshot) = self.cache.snapshot.get(PRICE_CACHE_KEY, self.price_max_age) {
            return Ok(snapshot);
        }

        if let Some(snapshot) = self.recent_persisted_snapshot() {
            self.cache.snapshot.set(PRICE_CACHE_KEY, snapshot.clone());
            return Ok(snapshot);
        }

        let simple = match self.provider.fetch_simple_price().await {
            Ok(simple) => simple,
            Err(PriceError::RateLimitExceeded) => return self.rate_limited_price_fallback(),
            Err(e) => return Err(e),
        };

        // ATH/ATL come from a secondary call; the price itself is never
        // blocked by its unavailability.
        let detail = match self.provider.fetch_market_detail().await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(
                    "Failed to fetch extended market data, using fallback constants: {}",
                    e
                );
                MarketDetail::default()
            }
        };

        let snapshot = build_snapshot(simple, detail);

        if let PersistOutcome::Failed(e) = self.persist_snapshot(&snapshot) {
            warn!("Failed to persist price snapshot: {}", e);
        }

        self.cache.snapshot.set(PRICE_CACHE_KEY, snapshot.clone());
        Ok(snapshot)
    }

    async fn get_history(&self, days: Option<i64>) -> Result<Vec<HistoricalPoint>> {
        let days = days
            .unwrap_or(DEFAULT_HISTORY_DAYS)
            .clamp(MIN_HISTORY_DAYS, MAX_HISTORY_DAYS);
        let cache_key = history_cache_key(days);

        if let Some(points) = self.cache.history.get(&cache_key, self.history_max_age) {
            return Ok(points);
        }

        let points = match self.provider.fetch_market_chart(days).await {
            Ok(points) => points,
            Err(PriceError::RateLimitExceeded) => {
                return self
                    .cache
                    .history
                    .peek(&cache_key)
                    .ok_or(PriceError::RateLimitExceeded);
            }
            Err(e) => return Err(e),
        };

        if let PersistOutcome::Failed(e) = self.persist_history(&points, Timeframe::for_days(days))
        {
            warn!("Failed to persist historical points: {}", e);
        }

        self.cache.history.set(&cache_key, points.clone());
        Ok(points)
    }
}
