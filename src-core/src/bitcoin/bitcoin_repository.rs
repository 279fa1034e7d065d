use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use super::bitcoin_errors::{PriceError, Result};
use super::bitcoin_model::{
    BitcoinPriceDB, BitcoinPriceRecord, HistoricalPoint, HistoricalPriceDB, NewBitcoinPriceDB,
    NewHistoricalPriceDB, PriceSnapshot, Timeframe,
};
use super::bitcoin_traits::BitcoinPriceRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::schema::{bitcoin_prices, historical_prices};

pub struct BitcoinPriceRepository {
    pool: Arc<DbPool>,
}

impl BitcoinPriceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl BitcoinPriceRepositoryTrait for BitcoinPriceRepository {
    fn save_snapshot(&self, snapshot: &PriceSnapshot) -> Result<BitcoinPriceRecord> {
        let mut conn = get_connection(&self.pool)?;

        let new_row = NewBitcoinPriceDB::from_snapshot(snapshot, Utc::now().naive_utc());

        diesel::insert_into(bitcoin_prices::table)
            .values(&new_row)
            .get_result::<BitcoinPriceDB>(&mut conn)
            .map(BitcoinPriceRecord::from)
            .map_err(PriceError::DatabaseError)
    }

    fn get_latest_snapshot(&self) -> Result<Option<BitcoinPriceRecord>> {
        let mut conn = get_connection(&self.pool)?;

        bitcoin_prices::table
            .order(bitcoin_prices::timestamp.desc())
            .first::<BitcoinPriceDB>(&mut conn)
            .optional()
            .map(|row| row.map(BitcoinPriceRecord::from))
            .map_err(PriceError::DatabaseError)
    }

    fn save_historical_points(
        &self,
        points: &[HistoricalPoint],
        timeframe: Timeframe,
    ) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let mut conn = get_connection(&self.pool)?;
        let created_at = Utc::now().naive_utc();

        // Batch inserts to keep the parameter count per statement bounded.
        for chunk in points.chunks(100) {
            let rows: Vec<NewHistoricalPriceDB> = chunk
                .iter()
                .map(|point| NewHistoricalPriceDB {
                    price: point.price,
                    timestamp: point.timestamp,
                    timeframe: timeframe.as_str().to_string(),
                    created_at,
                })
                .collect();

            diesel::insert_or_ignore_into(historical_prices::table)
                .values(&rows)
                .execute(&mut conn)
                .map_err(PriceError::DatabaseError)?;
        }

        Ok(())
    }

    fn get_historical_points(
        &self,
        timeframe: Timeframe,
        not_older_than: Option<NaiveDateTime>,
    ) -> Result<Vec<HistoricalPoint>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = historical_prices::table
            .filter(historical_prices::timeframe.eq(timeframe.as_str()))
            .into_boxed();

        if let Some(cutoff) = not_older_than {
            query = query.filter(historical_prices::created_at.ge(cutoff));
        }

        query
            .order(historical_prices::timestamp.asc())
            .load::<HistoricalPriceDB>(&mut conn)
            .map(|rows| rows.into_iter().map(HistoricalPoint::from).collect())
            .map_err(PriceError::DatabaseError)
    }

    fn purge_historical_points(&self, older_than: NaiveDateTime) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        diesel::delete(historical_prices::table.filter(historical_prices::created_at.lt(older_than)))
            .execute(&mut conn)
            .map_err(PriceError::DatabaseError)
    }
}
