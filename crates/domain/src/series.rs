//! Series Transformer: bars in, price series with moving averages out.

use crate::entities::{Bar, DerivedRow, SeriesPoint};
use crate::indicators::{MA_LONG_WINDOW, MA_SHORT_WINDOW, SimpleMovingAverage};
use crate::value_objects::price::Price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

const SHORT_WINDOW: NonZeroUsize = match NonZeroUsize::new(MA_SHORT_WINDOW) {
    Some(window) => window,
    None => panic!("short window must be non-zero"),
};
const LONG_WINDOW: NonZeroUsize = match NonZeroUsize::new(MA_LONG_WINDOW) {
    Some(window) => window,
    None => panic!("long window must be non-zero"),
};

/// Derives the close-price series and its MA-20 / MA-50 columns.
///
/// Bars are re-sorted by open time (stable) before the averages are taken, so
/// the output is always ascending by timestamp. An empty input yields an empty
/// output.
pub fn transform(bars: &[Bar]) -> Vec<DerivedRow> {
    let mut ordered: Vec<&Bar> = bars.iter().collect();
    ordered.sort_by_key(|bar| bar.open_time);

    let mut short = SimpleMovingAverage::from_nonzero(SHORT_WINDOW);
    let mut long = SimpleMovingAverage::from_nonzero(LONG_WINDOW);

    ordered
        .into_iter()
        .map(|bar| {
            let point = SeriesPoint::from(bar);
            let ma_20 = short.update(point.price.value);
            let ma_50 = long.update(point.price.value);
            DerivedRow::new(point, ma_20, ma_50)
        })
        .collect()
}

/// Relation of the short average to the long one at the latest row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// MA-20 above MA-50.
    Above,
    /// MA-20 below MA-50.
    Below,
    Equal,
    /// At least one of the averages is not yet defined.
    Undefined,
}

/// Headline figures of a derived series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub rows: usize,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
    pub last_price: Option<Price>,
    pub last_ma_20: Option<Decimal>,
    pub last_ma_50: Option<Decimal>,
    pub trend: Trend,
}

impl SeriesSummary {
    /// Summarizes rows produced by [`transform`].
    pub fn from_rows(rows: &[DerivedRow]) -> Self {
        let last = rows.last();
        let last_ma_20 = last.and_then(|row| row.ma_20);
        let last_ma_50 = last.and_then(|row| row.ma_50);

        let trend = match (last_ma_20, last_ma_50) {
            (Some(short), Some(long)) if short > long => Trend::Above,
            (Some(short), Some(long)) if short < long => Trend::Below,
            (Some(_), Some(_)) => Trend::Equal,
            _ => Trend::Undefined,
        };

        Self {
            rows: rows.len(),
            first_timestamp: rows.first().map(|row| row.timestamp),
            last_timestamp: last.map(|row| row.timestamp),
            last_price: last.map(|row| row.price),
            last_ma_20,
            last_ma_50,
            trend,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
