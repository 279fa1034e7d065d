pub mod bitcoin_constants;
pub mod bitcoin_errors;
pub mod bitcoin_model;
pub mod bitcoin_repository;
pub mod bitcoin_service;
pub mod bitcoin_traits;
pub mod cache;
pub mod providers;

pub use bitcoin_errors::PriceError;
pub use bitcoin_model::{BitcoinPriceRecord, HistoricalPoint, PriceSnapshot, Timeframe};
pub use bitcoin_repository::BitcoinPriceRepository;
pub use bitcoin_service::{BitcoinPriceService, PersistOutcome};
pub use bitcoin_traits::{BitcoinPriceRepositoryTrait, BitcoinPriceServiceTrait};
pub use cache::PriceCache;
