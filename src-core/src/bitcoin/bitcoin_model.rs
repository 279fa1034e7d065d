use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Normalized point-in-time price record served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub change_24h: f64,
    pub ath: f64,
    pub atl: f64,
    pub ath_date: String,
    pub atl_date: String,
}

/// One (timestamp, price) sample of the historical series.
/// Timestamps are milliseconds since the epoch, as the upstream reports them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Coarse bucket tag for persisted historical rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    OneYear,
    FiveYears,
    All,
}

impl Timeframe {
    pub fn for_days(days: i64) -> Self {
        if days <= 365 {
            Timeframe::OneYear
        } else if days <= 1825 {
            Timeframe::FiveYears
        } else {
            Timeframe::All
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneYear => "1Y",
            Timeframe::FiveYears => "5Y",
            Timeframe::All => "ALL",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted snapshot together with the time it was stored,
/// so callers can age-check before trusting it.
#[derive(Debug, Clone)]
pub struct BitcoinPriceRecord {
    pub id: i32,
    pub snapshot: PriceSnapshot,
    pub timestamp: NaiveDateTime,
}

/// Database model for persisted snapshots
#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::bitcoin_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BitcoinPriceDB {
    pub id: i32,
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub change_24h: f64,
    pub ath: f64,
    pub atl: f64,
    pub ath_date: String,
    pub atl_date: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::bitcoin_prices)]
pub struct NewBitcoinPriceDB {
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub change_24h: f64,
    pub ath: f64,
    pub atl: f64,
    pub ath_date: String,
    pub atl_date: String,
    pub timestamp: NaiveDateTime,
}

impl NewBitcoinPriceDB {
    pub fn from_snapshot(snapshot: &PriceSnapshot, timestamp: NaiveDateTime) -> Self {
        Self {
            price: snapshot.price,
            market_cap: snapshot.market_cap,
            volume_24h: snapshot.volume_24h,
            change_24h: snapshot.change_24h,
            ath: snapshot.ath,
            atl: snapshot.atl,
            ath_date: snapshot.ath_date.clone(),
            atl_date: snapshot.atl_date.clone(),
            timestamp,
        }
    }
}

/// Database model for persisted historical points
#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::historical_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoricalPriceDB {
    pub id: i32,
    pub price: f64,
    pub timestamp: i64,
    pub timeframe: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::historical_prices)]
pub struct NewHistoricalPriceDB {
    pub price: f64,
    pub timestamp: i64,
    pub timeframe: String,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<BitcoinPriceDB> for BitcoinPriceRecord {
    fn from(db: BitcoinPriceDB) -> Self {
        BitcoinPriceRecord {
            id: db.id,
            snapshot: PriceSnapshot {
                price: db.price,
                market_cap: db.market_cap,
                volume_24h: db.volume_24h,
                change_24h: db.change_24h,
                ath: db.ath,
                atl: db.atl,
                ath_date: db.ath_date,
                atl_date: db.atl_date,
            },
            timestamp: db.timestamp,
        }
    }
}

impl From<HistoricalPriceDB> for HistoricalPoint {
    fn from(db: HistoricalPriceDB) -> Self {
        HistoricalPoint {
            timestamp: db.timestamp,
            price: db.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_with_camel_case_keys() {
        let snapshot = PriceSnapshot {
            price: 65000.0,
            market_cap: 1.3e12,
            volume_24h: 3.0e10,
            change_24h: 2.1,
            ath: 73750.0,
            atl: 0.0048,
            ath_date: "Mar 14, 2024".to_string(),
            atl_date: "Jul 5, 2013".to_string(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["price"], 65000.0);
        assert_eq!(json["marketCap"], 1.3e12);
        assert_eq!(json["volume24h"], 3.0e10);
        assert_eq!(json["change24h"], 2.1);
        assert_eq!(json["athDate"], "Mar 14, 2024");
        assert_eq!(json["atlDate"], "Jul 5, 2013");
    }

    #[test]
    fn timeframe_buckets_by_day_count() {
        assert_eq!(Timeframe::for_days(1), Timeframe::OneYear);
        assert_eq!(Timeframe::for_days(365), Timeframe::OneYear);
        assert_eq!(Timeframe::for_days(366), Timeframe::FiveYears);
        assert_eq!(Timeframe::for_days(1825), Timeframe::FiveYears);
        assert_eq!(Timeframe::for_days(5475), Timeframe::All);
        assert_eq!(Timeframe::All.as_str(), "ALL");
    }
}
