//! Command Line Interface for BTC price history with moving averages.
use anyhow::{Result, bail};
use btc_ma_data::providers::{BinanceConfig, BinanceProvider};
use btc_ma_data::{CachedRangeFetcher, RangeFetcher};
use btc_ma_domain::prelude::*;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

/// Days of history shown when no start date is given.
const DEFAULT_LOOKBACK_DAYS: i64 = 365;

#[derive(Parser)]
#[command(name = "btc-ma")]
#[command(about = "Bitcoin price chart with 20 & 50 period moving averages", long_about = None)]
struct Cli {
    /// Timeframe: daily or 4h
    #[arg(short, long, default_value = "daily")]
    timeframe: Interval,

    /// Start date (YYYY-MM-DD), defaults to one year before the end date
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), defaults to today (UTC)
    #[arg(short, long)]
    end: Option<NaiveDate>,

    /// Print the date / price / MA20 / MA50 table
    #[arg(long)]
    show_raw: bool,

    /// Print the derived rows as JSON instead of the text views
    #[arg(long, conflicts_with = "show_raw")]
    json: bool,
}

impl Cli {
    fn window(&self) -> Result<FetchWindow> {
        let end = self.end.unwrap_or_else(|| Utc::now().date_naive());
        let window = match self.start {
            Some(start) => FetchWindow::new(start, end),
            None => FetchWindow::trailing_days(end, DEFAULT_LOOKBACK_DAYS)?,
        };
        if window.is_inverted() {
            bail!("Start date must be before end date");
        }
        Ok(window)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let window = cli.window()?;
    let interval = cli.timeframe;

    let provider = BinanceProvider::new(BinanceConfig::from_env());
    info!(base_url = %provider.config().base_url, "Using Binance klines endpoint");
    let fetcher = CachedRangeFetcher::new(RangeFetcher::new(provider));

    let bars = fetcher.fetch(window, interval).await;
    let rows = transform(&bars);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No data available for this range/timeframe.");
        return Ok(());
    }

    print_chart(&rows, interval, window);

    if cli.show_raw {
        println!();
        print_raw(&rows);
    }

    Ok(())
}

fn print_chart(rows: &[DerivedRow], interval: Interval, window: FetchWindow) {
    let summary = SeriesSummary::from_rows(rows);

    println!(
        "BTC {} Price with 20 & 50 Moving Averages",
        interval.label()
    );
    println!(
        "BTC Price ({}) with Moving Averages from {} to {}",
        interval.label(),
        window.start,
        window.end
    );
    println!("════════════════════════════════════");
    println!("Bars:            {}", summary.rows);
    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        println!(
            "Period:          {} → {}",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        );
    }
    if let Some(price) = summary.last_price {
        println!("Last Price:      ${}", two_dp(price.value));
    }
    println!("20-Period MA:    {}", money(summary.last_ma_20));
    println!("50-Period MA:    {}", money(summary.last_ma_50));
    let trend = match summary.trend {
        Trend::Above => "MA20 above MA50",
        Trend::Below => "MA20 below MA50",
        Trend::Equal => "MA20 equals MA50",
        Trend::Undefined => "not enough data",
    };
    println!("Trend:           {}", trend);
    println!("════════════════════════════════════");
}

fn print_raw(rows: &[DerivedRow]) {
    let mut table = Table::new();
    table.add_row(row!["Date", "Price", "MA20", "MA50"]);
    for r in rows {
        table.add_row(row![
            r.timestamp.format("%Y-%m-%d %H:%M"),
            two_dp(r.price.value),
            cell(r.ma_20),
            cell(r.ma_50)
        ]);
    }
    table.printstd();
}

/// Rounds half away from zero, then pads to two decimals.
fn two_dp(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn money(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("${}", two_dp(v)))
}

fn cell(value: Option<Decimal>) -> String {
    value.map_or_else(String::new, two_dp)
}
