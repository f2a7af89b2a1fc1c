//! Binance public klines endpoint.

use crate::error::DataError;
use crate::source::{KlineRequest, KlineSource};
use async_trait::async_trait;
use btc_ma_domain::entities::Bar;
use btc_ma_domain::value_objects::Price;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Public market data host.
pub const DEFAULT_BASE_URL: &str = "https://data.binance.com";

const KLINES_PATH: &str = "/api/v3/klines";

/// Configuration for the Binance provider.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl BinanceConfig {
    /// Reads `BINANCE_BASE_URL`, falling back to the public host.
    pub fn from_env() -> Self {
        match env::var("BINANCE_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => Self {
                base_url: base_url.trim().trim_end_matches('/').to_string(),
            },
            _ => Self::default(),
        }
    }

    fn klines_url(&self) -> String {
        format!("{}{}", self.base_url, KLINES_PATH)
    }
}

/// Kline source backed by the Binance REST API.
#[derive(Debug, Clone)]
pub struct BinanceProvider {
    client: Client,
    config: BinanceConfig,
}

impl BinanceProvider {
    /// Creates a provider with the default HTTP client.
    #[must_use]
    pub fn new(config: BinanceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: BinanceConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }
}

#[async_trait]
impl KlineSource for BinanceProvider {
    async fn fetch_klines(&self, request: &KlineRequest) -> Result<Vec<Bar>, DataError> {
        let response = self
            .client
            .get(self.config.klines_url())
            .query(&[
                ("symbol", request.symbol.clone()),
                ("interval", request.interval.as_api_str().to_string()),
                ("startTime", request.start_time_ms.to_string()),
                ("endTime", request.end_time_ms.to_string()),
                ("limit", request.limit.to_string()),
            ])
            .send()
            .await?;

        // Error objects arrive with a 4xx status; the body decides, not the status.
        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            start_time = request.start_time_ms,
            "Received klines response"
        );

        parse_klines(&body)
    }
}

/// Positional kline row: open time, open, high, low, close, volume,
/// close time, quote asset volume, trade count, taker buy base volume,
/// taker buy quote volume, unused.
type RawKline = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    u64,
    String,
    String,
    serde_json::Value,
);

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    #[serde(default)]
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KlinesResponse {
    Klines(Vec<RawKline>),
    Error(ApiErrorBody),
}

/// Decodes a klines response body into named-field bars.
///
/// # Errors
/// Returns `DataError::Upstream` for an error object, `DataError::Decode` for
/// any other unexpected shape, and `DataError::Malformed` for a row whose
/// fields do not parse.
pub fn parse_klines(body: &str) -> Result<Vec<Bar>, DataError> {
    match serde_json::from_str::<KlinesResponse>(body)? {
        KlinesResponse::Klines(rows) => rows.into_iter().map(bar_from_raw).collect(),
        KlinesResponse::Error(err) => Err(DataError::Upstream {
            code: err.code,
            message: err.msg,
        }),
    }
}

fn bar_from_raw(raw: RawKline) -> Result<Bar, DataError> {
    let (
        open_time,
        open,
        high,
        low,
        close,
        volume,
        close_time,
        quote_asset_volume,
        trade_count,
        taker_buy_base_volume,
        taker_buy_quote_volume,
        _,
    ) = raw;

    Ok(Bar {
        open_time: instant(open_time)?,
        open: Price::new(decimal("open", &open)?),
        high: Price::new(decimal("high", &high)?),
        low: Price::new(decimal("low", &low)?),
        close: Price::new(decimal("close", &close)?),
        volume: decimal("volume", &volume)?,
        close_time: instant(close_time)?,
        quote_asset_volume: decimal("quote_asset_volume", &quote_asset_volume)?,
        trade_count,
        taker_buy_base_volume: decimal("taker_buy_base_volume", &taker_buy_base_volume)?,
        taker_buy_quote_volume: decimal("taker_buy_quote_volume", &taker_buy_quote_volume)?,
    })
}

fn decimal(field: &str, value: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(value).map_err(|e| DataError::Malformed(format!("{field} = {value:?}: {e}")))
}

fn instant(timestamp_ms: i64) -> Result<DateTime<Utc>, DataError> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .ok_or_else(|| DataError::Malformed(format!("timestamp out of range: {timestamp_ms}")))
}
