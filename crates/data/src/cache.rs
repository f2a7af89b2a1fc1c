//! Session cache in front of the range fetcher.

use crate::fetcher::RangeFetcher;
use crate::source::KlineSource;
use btc_ma_domain::entities::Bar;
use btc_ma_domain::enums::Interval;
use btc_ma_domain::value_objects::FetchWindow;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Default number of memoized windows.
pub const DEFAULT_CAPACITY: usize = 64;

/// Exact input tuple a fetch is memoized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub window: FetchWindow,
    pub interval: Interval,
}

#[derive(Default)]
struct Entries {
    map: HashMap<FetchKey, Arc<Vec<Bar>>>,
    /// Insertion order, oldest first.
    order: VecDeque<FetchKey>,
}

impl Entries {
    fn insert(&mut self, key: FetchKey, bars: Arc<Vec<Bar>>, capacity: usize) {
        while self.map.len() >= capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.map.remove(&oldest);
            debug!(start = %oldest.window.start, end = %oldest.window.end, "Evicted cached range");
        }
        self.order.push_back(key);
        self.map.insert(key, bars);
    }
}

/// Memoizes [`RangeFetcher::fetch`] by `(start, end, interval)`.
///
/// Results, partial ones included, are kept for the lifetime of the value.
/// The lock is held across the fetch, so identical concurrent calls hit the
/// network once.
pub struct CachedRangeFetcher<S> {
    fetcher: RangeFetcher<S>,
    entries: Mutex<Entries>,
    capacity: usize,
}

impl<S: KlineSource> CachedRangeFetcher<S> {
    /// Creates a cache with [`DEFAULT_CAPACITY`] entries.
    pub fn new(fetcher: RangeFetcher<S>) -> Self {
        Self::with_capacity(fetcher, DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` windows (minimum one).
    pub fn with_capacity(fetcher: RangeFetcher<S>, capacity: usize) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn fetcher(&self) -> &RangeFetcher<S> {
        &self.fetcher
    }

    /// Returns the bars for the window, fetching them on first use.
    pub async fn fetch(&self, window: FetchWindow, interval: Interval) -> Arc<Vec<Bar>> {
        let key = FetchKey { window, interval };
        let mut entries = self.entries.lock().await;

        if let Some(bars) = entries.map.get(&key) {
            debug!(start = %window.start, end = %window.end, interval = interval.as_api_str(), "Range cache hit");
            return Arc::clone(bars);
        }

        debug!(start = %window.start, end = %window.end, interval = interval.as_api_str(), "Range cache miss");
        let bars = Arc::new(self.fetcher.fetch(window, interval).await);
        entries.insert(key, Arc::clone(&bars), self.capacity);
        bars
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.map.clear();
        entries.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockKlineSource, date, midnight, series};

    fn cached(days: usize) -> CachedRangeFetcher<MockKlineSource> {
        let bars = series(midnight(date(2024, 1, 1)), Interval::Daily, days);
        CachedRangeFetcher::new(RangeFetcher::new(MockKlineSource::new(bars)))
    }

    fn calls(cache: &CachedRangeFetcher<MockKlineSource>) -> usize {
        cache.fetcher().source().calls()
    }

    #[tokio::test]
    async fn test_identical_fetch_is_served_from_cache() {
        let cache = cached(30);
        let window = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 30));

        let first = cache.fetch(window, Interval::Daily).await;
        let second = cache.fetch(window, Interval::Daily).await;

        assert_eq!(first.len(), 30);
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls(&cache), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_different_inputs_are_separate_entries() {
        let cache = cached(30);
        let window = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 30));
        let shorter = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 10));

        cache.fetch(window, Interval::Daily).await;
        cache.fetch(shorter, Interval::Daily).await;
        cache.fetch(window, Interval::FourHour).await;

        assert_eq!(calls(&cache), 3);
        assert_eq!(cache.len().await, 3);
    }

    #[tokio::test]
    async fn test_empty_result_is_cached() {
        let cache = cached(5);
        let window = FetchWindow::new(date(2020, 1, 1), date(2020, 1, 31));

        assert!(cache.fetch(window, Interval::Daily).await.is_empty());
        assert!(cache.fetch(window, Interval::Daily).await.is_empty());
        assert_eq!(calls(&cache), 1);
    }

    #[tokio::test]
    async fn test_oldest_entry_is_evicted_at_capacity() {
        let bars = series(midnight(date(2024, 1, 1)), Interval::Daily, 10);
        let cache =
            CachedRangeFetcher::with_capacity(RangeFetcher::new(MockKlineSource::new(bars)), 2);
        let a = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 2));
        let b = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 3));
        let c = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 4));

        cache.fetch(a, Interval::Daily).await;
        cache.fetch(b, Interval::Daily).await;
        cache.fetch(c, Interval::Daily).await;
        assert_eq!(cache.len().await, 2);
        assert_eq!(calls(&cache), 3);

        // b and c are still cached, a was evicted.
        cache.fetch(b, Interval::Daily).await;
        cache.fetch(c, Interval::Daily).await;
        assert_eq!(calls(&cache), 3);
        cache.fetch(a, Interval::Daily).await;
        assert_eq!(calls(&cache), 4);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = cached(3);
        let window = FetchWindow::new(date(2024, 1, 1), date(2024, 1, 3));

        cache.fetch(window, Interval::Daily).await;
        cache.clear().await;
        assert!(cache.is_empty().await);

        cache.fetch(window, Interval::Daily).await;
        assert_eq!(calls(&cache), 2);
    }
}
