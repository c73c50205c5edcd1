// Service exports
pub mod cache;
pub mod postgres;
pub mod seed;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use postgres::{PostgresClient, PostgresError};
pub use seed::{seed_countries, seed_records};
