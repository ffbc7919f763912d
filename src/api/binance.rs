use super::{spot_symbol, BarProvider, QuoteProvider};
use crate::error::SignalError;
use crate::models::{Bar, Horizon};
use crate::Result;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

const BINANCE_API_BASE: &str = "https://api.binance.com";
const PROVIDER: &str = "binance";

/// Client for the Binance spot REST API (public endpoints only)
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self::with_base_url(BINANCE_API_BASE)
    }

    /// Custom base URL, for tests against a mock server
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn err(message: impl ToString) -> SignalError {
        SignalError::provider(PROVIDER, message)
    }

    fn interval(horizon: Horizon) -> &'static str {
        match horizon {
            Horizon::Swing => "4h",
            Horizon::Positional => "1d",
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for BinanceClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn get_price(&self, symbol: &str) -> Result<f64> {
        let url = format!(
            "{}/api/v3/ticker/price?symbol={}",
            self.base_url,
            spot_symbol(symbol)
        );

        let response = self.client.get(&url).send().await.map_err(Self::err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::err(format!("HTTP {status} for {symbol}")));
        }

        let ticker: TickerPrice = response.json().await.map_err(Self::err)?;
        ticker
            .price
            .parse::<f64>()
            .map_err(|e| Self::err(format!("bad price field: {e}")))
    }
}

#[async_trait]
impl BarProvider for BinanceClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_bars(&self, symbol: &str, horizon: Horizon, limit: usize) -> Result<Vec<Bar>> {
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            spot_symbol(symbol),
            Self::interval(horizon),
            limit
        );

        let response = self.client.get(&url).send().await.map_err(Self::err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::err(format!("HTTP {status} for {symbol}")));
        }

        // Kline rows are heterogeneous arrays:
        // [open_time, "open", "high", "low", "close", "volume", close_time, ...]
        let rows: Vec<Vec<serde_json::Value>> = response.json().await.map_err(Self::err)?;

        let mut bars = Vec::with_capacity(rows.len());
        for row in &rows {
            bars.push(parse_kline(row).ok_or_else(|| Self::err("malformed kline row"))?);
        }

        Ok(bars) // Binance serves oldest first
    }
}

fn parse_kline(row: &[serde_json::Value]) -> Option<Bar> {
    let ts_ms = row.first()?.as_i64()?;
    let timestamp = DateTime::from_timestamp_millis(ts_ms)?;
    let field = |i: usize| -> Option<f64> { row.get(i)?.as_str()?.parse().ok() };

    Some(Bar {
        timestamp,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
        volume: field(5)?,
    })
}
