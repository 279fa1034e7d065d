use std::time::Duration;

/// Cache key for the current price snapshot.
pub const PRICE_CACHE_KEY: &str = "bitcoin-price";

/// Cache key prefix for historical series; the clamped day-count is appended.
pub const HISTORY_CACHE_KEY_PREFIX: &str = "bitcoin-history";

/// Freshness window for the current price snapshot.
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(60);

/// Freshness window for historical series.
pub const HISTORY_CACHE_TTL: Duration = Duration::from_secs(300);

pub const DEFAULT_HISTORY_DAYS: i64 = 365;
pub const MIN_HISTORY_DAYS: i64 = 1;
/// ~15 years, the longest lookback the upstream serves daily data for.
pub const MAX_HISTORY_DAYS: i64 = 5475;

/// Persisted historical rows older than this are purged after a refresh.
pub const HISTORY_RETENTION: Duration = Duration::from_secs(7 * 24 * 3600);

// Last-known-good values substituted when the extended market data call
// is unavailable. The price itself is never blocked on these.
pub const FALLBACK_ATH: f64 = 73750.0;
pub const FALLBACK_ATL: f64 = 0.0048;
pub const FALLBACK_ATH_DATE: &str = "Mar 14, 2024";
pub const FALLBACK_ATL_DATE: &str = "Jul 5, 2013";

pub fn history_cache_key(days: i64) -> String {
    format!("{}-{}", HISTORY_CACHE_KEY_PREFIX, days)
}
