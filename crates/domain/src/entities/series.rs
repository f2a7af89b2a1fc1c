use crate::entities::bar::Bar;
use crate::value_objects::price::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single (timestamp, price) observation taken from a bar's close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub price: Price,
}

impl From<&Bar> for SeriesPoint {
    fn from(bar: &Bar) -> Self {
        Self {
            timestamp: bar.close_time,
            price: bar.close,
        }
    }
}

/// A series point with its trailing moving averages.
///
/// An average is `None` until enough prior points exist to fill its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub timestamp: DateTime<Utc>,
    pub price: Price,
    pub ma_20: Option<Decimal>,
    pub ma_50: Option<Decimal>,
}

impl DerivedRow {
    pub fn new(point: SeriesPoint, ma_20: Option<Decimal>, ma_50: Option<Decimal>) -> Self {
        Self {
            timestamp: point.timestamp,
            price: point.price,
            ma_20,
            ma_50,
        }
    }
}
