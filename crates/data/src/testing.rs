//! In-memory kline source for tests.

use crate::error::DataError;
use crate::source::{KlineRequest, KlineSource};
use async_trait::async_trait;
use btc_ma_domain::entities::Bar;
use btc_ma_domain::enums::Interval;
use btc_ma_domain::value_objects::Price;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

pub(crate) fn bar_at(open_time: DateTime<Utc>, interval: Interval, close: Decimal) -> Bar {
    let price = Price::new(close);
    Bar {
        open_time,
        open: price,
        high: price,
        low: price,
        close: price,
        volume: Decimal::ONE,
        close_time: open_time + interval.duration() - Duration::milliseconds(1),
        quote_asset_volume: close,
        trade_count: 1,
        taker_buy_base_volume: Decimal::ZERO,
        taker_buy_quote_volume: Decimal::ZERO,
    }
}

/// `count` consecutive bars starting at `first_open`, closes 1, 2, 3, ...
pub(crate) fn series(first_open: DateTime<Utc>, interval: Interval, count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let open = first_open + interval.duration() * i as i32;
            bar_at(open, interval, Decimal::from(i + 1))
        })
        .collect()
}

/// Serves pages out of a fixed bar list, honoring start/end/limit.
pub(crate) struct MockKlineSource {
    bars: Vec<Bar>,
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
    ignore_cursor: bool,
    requests: Mutex<Vec<KlineRequest>>,
}

impl MockKlineSource {
    pub(crate) fn new(bars: Vec<Bar>) -> Self {
        Self {
            bars,
            calls: AtomicUsize::new(0),
            fail_on_call: None,
            ignore_cursor: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Makes the `call`-th request (1-based) return an upstream error.
    pub(crate) fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Always serves from the first bar, as a misbehaving upstream would.
    pub(crate) fn ignoring_cursor(mut self) -> Self {
        self.ignore_cursor = true;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<KlineRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl KlineSource for MockKlineSource {
    async fn fetch_klines(&self, request: &KlineRequest) -> Result<Vec<Bar>, DataError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_on_call == Some(call) {
            return Err(DataError::Upstream {
                code: -1003,
                message: "Too many requests".to_string(),
            });
        }

        let start = if self.ignore_cursor {
            i64::MIN
        } else {
            request.start_time_ms
        };
        Ok(self
            .bars
            .iter()
            .filter(|bar| {
                let open = bar.open_time_ms();
                open >= start && open <= request.end_time_ms
            })
            .take(request.limit as usize)
            .cloned()
            .collect())
    }
}
