use crate::value_objects::price::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sampling interval's OHLCV record as reported by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub open_time: DateTime<Utc>,

    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,

    /// Base asset volume.
    pub volume: Decimal,
    pub close_time: DateTime<Utc>,

    pub quote_asset_volume: Decimal,
    pub trade_count: u64,
    pub taker_buy_base_volume: Decimal,
    pub taker_buy_quote_volume: Decimal,
}

impl Bar {
    /// Open time in epoch milliseconds, the exchange's pagination cursor.
    pub fn open_time_ms(&self) -> i64 {
        self.open_time.timestamp_millis()
    }
}
