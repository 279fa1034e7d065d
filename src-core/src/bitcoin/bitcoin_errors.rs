use thiserror::Error;

use crate::errors::DatabaseError;

pub type Result<T> = std::result::Result<T, PriceError>;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Database error: {0}")]
    DatabaseConnectionError(#[from] DatabaseError),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl From<crate::errors::Error> for PriceError {
    fn from(err: crate::errors::Error) -> Self {
        match err {
            crate::errors::Error::Database(e) => PriceError::DatabaseConnectionError(e),
            crate::errors::Error::Price(e) => e,
            other => PriceError::ProviderError(other.to_string()),
        }
    }
}
