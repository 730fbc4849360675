// Service exports
pub mod cache;
pub mod geocoder;
pub mod notifier;
pub mod postgres;

pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
pub use geocoder::{GeocoderClient, GeocodeError};
pub use notifier::{Notifier, BatchReport, SearchReport};
pub use postgres::{PostgresClient, PostgresError, UserRole};
