//! CoinGecko provider implementation.
//!
//! Two read-only endpoint families are used: the simple price endpoint for
//! current market stats, and the coin detail endpoint for all-time high/low
//! data. Historical series come from the market chart endpoint.
//!
//! HTTP 429 is surfaced as [`PriceError::RateLimitExceeded`] so the service
//! can run its stale-data fallback; every other failure is generic.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::bitcoin::bitcoin_errors::PriceError;
use crate::bitcoin::bitcoin_model::HistoricalPoint;
use crate::bitcoin::providers::models::{
    CoinDetailResponse, MarketChartResponse, MarketDetail, SimplePrice, SimplePriceResponse,
};
use crate::bitcoin::providers::BitcoinPriceProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a provider against the public CoinGecko API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom base URL (test servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, PriceError> {
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(PriceError::ProviderError(format!(
                "CoinGecko API error: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| PriceError::ParsingError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BitcoinPriceProvider for CoinGeckoProvider {
    async fn fetch_simple_price(&self) -> Result<SimplePrice, PriceError> {
        let url = format!(
            "{}/simple/price?ids=bitcoin&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
            self.base_url
        );

        let response: SimplePriceResponse = self.fetch_json(&url).await?;
        response
            .bitcoin
            .map(SimplePrice::from)
            .ok_or_else(|| PriceError::NotFound("No bitcoin data in response".to_string()))
    }

    async fn fetch_market_detail(&self) -> Result<MarketDetail, PriceError> {
        let url = format!(
            "{}/coins/bitcoin?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false",
            self.base_url
        );

        let response: CoinDetailResponse = self.fetch_json(&url).await?;
        Ok(MarketDetail::from(response))
    }

    async fn fetch_market_chart(&self, days: i64) -> Result<Vec<HistoricalPoint>, PriceError> {
        let url = format!(
            "{}/coins/bitcoin/market_chart?vs_currency=usd&days={}&interval=daily",
            self.base_url, days
        );

        let response: MarketChartResponse = self.fetch_json(&url).await?;
        Ok(response.into())
    }
}
