use crate::error::DataError;
use async_trait::async_trait;
use btc_ma_domain::entities::Bar;
use btc_ma_domain::enums::Interval;

/// Parameters of a single klines request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineRequest {
    /// Exchange market symbol (e.g., "BTCUSDT").
    pub symbol: String,
    pub interval: Interval,
    /// Inclusive lower bound on bar open time, epoch milliseconds.
    pub start_time_ms: i64,
    /// Inclusive upper bound on bar open time, epoch milliseconds.
    pub end_time_ms: i64,
    /// Maximum number of bars to return.
    pub limit: u32,
}

/// A source of historical klines that serves one page per call.
#[async_trait]
pub trait KlineSource: Send + Sync {
    /// Fetches at most `request.limit` bars, ascending by open time.
    async fn fetch_klines(&self, request: &KlineRequest) -> Result<Vec<Bar>, DataError>;
}
