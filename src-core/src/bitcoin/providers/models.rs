//! Wire models for the CoinGecko endpoints, plus their normalized
//! domain counterparts.

use chrono::DateTime;
use serde::Deserialize;

use crate::bitcoin::bitcoin_model::HistoricalPoint;

/// Response from `/simple/price?ids=bitcoin&...`.
#[derive(Debug, Deserialize)]
pub struct SimplePriceResponse {
    #[serde(default)]
    pub bitcoin: Option<SimplePriceData>,
}

#[derive(Debug, Deserialize)]
pub struct SimplePriceData {
    pub usd: f64,
    #[serde(default)]
    pub usd_market_cap: f64,
    #[serde(default)]
    pub usd_24h_vol: f64,
    #[serde(default)]
    pub usd_24h_change: f64,
}

/// Normalized current price stats.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplePrice {
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub change_24h: f64,
}

impl From<SimplePriceData> for SimplePrice {
    fn from(data: SimplePriceData) -> Self {
        SimplePrice {
            price: data.usd,
            market_cap: data.usd_market_cap,
            volume_24h: data.usd_24h_vol,
            change_24h: data.usd_24h_change,
        }
    }
}

/// Response from `/coins/bitcoin?market_data=true&...`. Every field is
/// optional; missing values fall back to last-known-good constants later.
#[derive(Debug, Deserialize)]
pub struct CoinDetailResponse {
    #[serde(default)]
    pub market_data: Option<CoinMarketData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub ath: Option<UsdValue>,
    #[serde(default)]
    pub atl: Option<UsdValue>,
    #[serde(default)]
    pub ath_date: Option<UsdDate>,
    #[serde(default)]
    pub atl_date: Option<UsdDate>,
}

#[derive(Debug, Deserialize)]
pub struct UsdValue {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UsdDate {
    #[serde(default)]
    pub usd: Option<String>,
}

/// Extended market data with dates already rendered for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketDetail {
    pub ath: Option<f64>,
    pub atl: Option<f64>,
    pub ath_date: Option<String>,
    pub atl_date: Option<String>,
}

impl From<CoinDetailResponse> for MarketDetail {
    fn from(response: CoinDetailResponse) -> Self {
        let market_data = match response.market_data {
            Some(data) => data,
            None => return MarketDetail::default(),
        };

        MarketDetail {
            ath: market_data.ath.and_then(|v| v.usd),
            atl: market_data.atl.and_then(|v| v.usd),
            ath_date: market_data
                .ath_date
                .and_then(|d| d.usd)
                .and_then(|raw| format_market_date(&raw)),
            atl_date: market_data
                .atl_date
                .and_then(|d| d.usd)
                .and_then(|raw| format_market_date(&raw)),
        }
    }
}

/// Response from `/coins/bitcoin/market_chart?...`: raw `[timestamp_ms, price]`
/// pairs in chronological order.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
}

impl From<MarketChartResponse> for Vec<HistoricalPoint> {
    fn from(response: MarketChartResponse) -> Self {
        response
            .prices
            .into_iter()
            .map(|(timestamp, price)| HistoricalPoint {
                timestamp: timestamp as i64,
                price,
            })
            .collect()
    }
}

/// Renders an upstream RFC 3339 date as e.g. "Mar 14, 2024".
fn format_market_date(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.format("%b %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_price_response() {
        let body = r#"{"bitcoin":{"usd":65000,"usd_market_cap":1.3e12,"usd_24h_vol":3e10,"usd_24h_change":2.1}}"#;
        let parsed: SimplePriceResponse = serde_json::from_str(body).unwrap();
        let simple = SimplePrice::from(parsed.bitcoin.unwrap());

        assert_eq!(simple.price, 65000.0);
        assert_eq!(simple.market_cap, 1.3e12);
        assert_eq!(simple.volume_24h, 3.0e10);
        assert_eq!(simple.change_24h, 2.1);
    }

    #[test]
    fn test_parse_coin_detail_with_market_data() {
        let body = r#"{
            "market_data": {
                "ath": {"usd": 73750},
                "atl": {"usd": 0.0048},
                "ath_date": {"usd": "2024-03-14T07:10:36.635Z"},
                "atl_date": {"usd": "2013-07-05T00:00:00.000Z"}
            }
        }"#;
        let parsed: CoinDetailResponse = serde_json::from_str(body).unwrap();
        let detail = MarketDetail::from(parsed);

        assert_eq!(detail.ath, Some(73750.0));
        assert_eq!(detail.atl, Some(0.0048));
        assert_eq!(detail.ath_date.as_deref(), Some("Mar 14, 2024"));
        assert_eq!(detail.atl_date.as_deref(), Some("Jul 5, 2013"));
    }

    #[test]
    fn test_coin_detail_without_market_data_is_empty() {
        let parsed: CoinDetailResponse = serde_json::from_str("{}").unwrap();
        let detail = MarketDetail::from(parsed);

        assert_eq!(detail, MarketDetail::default());
    }

    #[test]
    fn test_market_chart_preserves_order_and_length() {
        let body = r#"{"prices":[[1700000000000,35000.5],[1700086400000,35100.0],[1700172800000,34900.25]]}"#;
        let parsed: MarketChartResponse = serde_json::from_str(body).unwrap();
        let points: Vec<HistoricalPoint> = parsed.into();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].timestamp, 1700000000000);
        assert_eq!(points[0].price, 35000.5);
        assert_eq!(points[2].timestamp, 1700172800000);
        assert!(points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
