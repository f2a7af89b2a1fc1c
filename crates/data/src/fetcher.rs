//! Range Fetcher: assembles every bar of a date window from a capped source.

use crate::source::{KlineRequest, KlineSource};
use btc_ma_domain::entities::Bar;
use btc_ma_domain::enums::Interval;
use btc_ma_domain::value_objects::FetchWindow;
use tracing::{debug, info, warn};

/// Maximum number of bars the upstream returns per call.
pub const PAGE_LIMIT: u32 = 1000;
/// Market the fetcher requests.
pub const DEFAULT_SYMBOL: &str = "BTCUSDT";

/// Configuration for the range fetcher.
///
/// The defaults are what production uses; other values exist for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Exchange market symbol.
    pub symbol: String,
    /// Page size sent as `limit`; a shorter page signals end of data.
    pub page_limit: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            page_limit: PAGE_LIMIT,
        }
    }
}

/// Fetches a complete, ordered bar sequence for a window by paging through
/// a [`KlineSource`].
pub struct RangeFetcher<S> {
    source: S,
    config: FetcherConfig,
}

impl<S: KlineSource> RangeFetcher<S> {
    /// Creates a fetcher with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, FetcherConfig::default())
    }

    pub fn with_config(source: S, config: FetcherConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches all bars whose open time falls inside `window`.
    ///
    /// Pages are requested one after another, each starting one millisecond
    /// after the previous page's last open time. Paging stops when the window
    /// is exhausted, a page comes back short or empty, or the source fails.
    /// A failure is not reported: the bars gathered so far are returned.
    pub async fn fetch(&self, window: FetchWindow, interval: Interval) -> Vec<Bar> {
        let start_ms = window.start_ms();
        let end_ms = window.end_ms();
        let page_limit = self.config.page_limit as usize;

        let mut bars: Vec<Bar> = Vec::new();
        let mut cursor = start_ms;
        let mut pages = 0usize;

        loop {
            let request = KlineRequest {
                symbol: self.config.symbol.clone(),
                interval,
                start_time_ms: cursor,
                end_time_ms: end_ms,
                limit: self.config.page_limit,
            };

            let page = match self.source.fetch_klines(&request).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        error = %e,
                        cursor,
                        collected = bars.len(),
                        "Kline pagination stopped on error"
                    );
                    break;
                }
            };
            pages += 1;

            let Some(last_open) = page.last().map(Bar::open_time_ms) else {
                debug!(cursor, "Empty kline page");
                break;
            };
            let page_len = page.len();
            debug!(page = pages, cursor, rows = page_len, last_open, "Fetched kline page");

            for bar in page {
                let open = bar.open_time_ms();
                let advances = bars.last().is_none_or(|prev| open > prev.open_time_ms());
                if advances && open >= start_ms && open <= end_ms {
                    bars.push(bar);
                }
            }

            if last_open >= end_ms || page_len < page_limit {
                break;
            }
            if last_open < cursor {
                warn!(cursor, last_open, "Kline page did not advance, stopping");
                break;
            }
            cursor = last_open + 1;
        }

        info!(
            symbol = %self.config.symbol,
            interval = interval.as_api_str(),
            start = %window.start,
            end = %window.end,
            pages,
            bars = bars.len(),
            "Fetched kline range"
        );
        bars
    }
}
