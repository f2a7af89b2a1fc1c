//! Market data access for BTC price history.
//!
//! This crate provides:
//! - The `KlineSource` seam over a klines-style HTTP endpoint
//! - A Binance implementation of that seam
//! - The paginating `RangeFetcher` that assembles a full window of bars
//! - A session-lifetime memoizing cache in front of the fetcher

/// Memoizing cache.
pub mod cache;
/// Error types.
pub mod error;
/// Paginated range fetching.
pub mod fetcher;
/// Exchange providers.
pub mod providers;
/// Kline source abstraction.
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CachedRangeFetcher, FetchKey};
pub use error::DataError;
pub use fetcher::{DEFAULT_SYMBOL, FetcherConfig, PAGE_LIMIT, RangeFetcher};
pub use source::{KlineRequest, KlineSource};
