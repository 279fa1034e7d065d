pub mod bitcoin;
pub mod db;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
