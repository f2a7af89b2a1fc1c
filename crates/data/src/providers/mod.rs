//! Exchange-specific kline sources.

mod binance;

pub use binance::{BinanceConfig, BinanceProvider, DEFAULT_BASE_URL, parse_klines};
