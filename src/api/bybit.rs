use super::{spot_symbol, BarProvider, QuoteProvider};
use crate::error::SignalError;
use crate::models::{Bar, Horizon};
use crate::Result;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

const BYBIT_API_BASE: &str = "https://api.bybit.com";
const PROVIDER: &str = "bybit";

/// Client for the Bybit v5 market API (public endpoints only)
#[derive(Clone)]
pub struct BybitClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BybitResponse<T> {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg")]
    ret_msg: String,
    result: T,
}

#[derive(Debug, Deserialize)]
struct TickerResult {
    list: Vec<TickerEntry>,
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    #[serde(rename = "lastPrice")]
    last_price: String,
}

#[derive(Debug, Deserialize)]
struct KlineResult {
    // [start_time_ms, open, high, low, close, volume, turnover], all strings
    list: Vec<Vec<String>>,
}

impl BybitClient {
    pub fn new() -> Self {
        Self::with_base_url(BYBIT_API_BASE)
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
            Horizon::Swing => "240",
            Horizon::Positional => "D",
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(Self::err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::err(format!("HTTP {status}")));
        }
        response.json().await.map_err(Self::err)
    }
}

impl Default for BybitClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for BybitClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn get_price(&self, symbol: &str) -> Result<f64> {
        let url = format!(
            "{}/v5/market/tickers?category=spot&symbol={}",
            self.base_url,
            spot_symbol(symbol)
        );

        let response: BybitResponse<TickerResult> = self.get_json(&url).await?;
        if response.ret_code != 0 {
            return Err(Self::err(format!(
                "retCode {} for {symbol}: {}",
                response.ret_code, response.ret_msg
            )));
        }

        let entry = response
            .result
            .list
            .first()
            .ok_or_else(|| Self::err(format!("no ticker entry for {symbol}")))?;

        entry
            .last_price
            .parse::<f64>()
            .map_err(|e| Self::err(format!("bad lastPrice field: {e}")))
    }
}

#[async_trait]
impl BarProvider for BybitClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_bars(&self, symbol: &str, horizon: Horizon, limit: usize) -> Result<Vec<Bar>> {
        let url = format!(
            "{}/v5/market/kline?category=spot&symbol={}&interval={}&limit={}",
            self.base_url,
            spot_symbol(symbol),
            Self::interval(horizon),
            limit
        );

        let response: BybitResponse<KlineResult> = self.get_json(&url).await?;
        if response.ret_code != 0 {
            return Err(Self::err(format!(
                "retCode {} for {symbol}: {}",
                response.ret_code, response.ret_msg
            )));
        }

        let mut bars = Vec::with_capacity(response.result.list.len());
        for row in &response.result.list {
            bars.push(parse_kline(row).ok_or_else(|| Self::err("malformed kline row"))?);
        }

        // Bybit serves newest first; the pipeline wants oldest first
        bars.reverse();
        Ok(bars)
    }
}

fn parse_kline(row: &[String]) -> Option<Bar> {
    let ts_ms: i64 = row.first()?.parse().ok()?;
    let timestamp = DateTime::from_timestamp_millis(ts_ms)?;
    let field = |i: usize| -> Option<f64> { row.get(i)?.parse().ok() };

    Some(Bar {
        timestamp,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
        volume: field(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_price_parses_ticker() {
        let body = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {"category": "spot", "list": [{"symbol": "BTCUSDT", "lastPrice": "64199.5"}]}
        }"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v5/market/tickers?category=spot&symbol=BTCUSDT")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = BybitClient::with_base_url(&server.url());
        let price = client.get_price("BTC/USDT").await.unwrap();
        assert!((price - 64199.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_nonzero_ret_code_is_provider_error() {
        let body = r#"{"retCode": 10001, "retMsg": "params error", "result": {"list": []}}"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v5/market/tickers?category=spot&symbol=NOPEUSDT")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = BybitClient::with_base_url(&server.url());
        let err = client.get_price("NOPE/USDT").await.unwrap_err();
        assert!(matches!(err, SignalError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_fetch_bars_reverses_to_oldest_first() {
        // Bybit returns newest first
        let body = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {"category": "spot", "symbol": "BTCUSDT", "list": [
                ["1700014400000","101.0","103.0","100.0","102.0","2345.6","0"],
                ["1700000000000","100.0","102.0","99.0","101.0","1234.5","0"]
            ]}
        }"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                "/v5/market/kline?category=spot&symbol=BTCUSDT&interval=240&limit=400",
            )
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = BybitClient::with_base_url(&server.url());
        let bars = client
            .fetch_bars("BTC/USDT", Horizon::Swing, 400)
            .await
            .unwrap();

        assert_eq!(bars.len(), 2);
        assert!(bars[0].timestamp < bars[1].timestamp);
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[1].close, 102.0);
    }

    #[test]
    fn test_interval_mapping() {
        assert_eq!(BybitClient::interval(Horizon::Swing), "240");
        assert_eq!(BybitClient::interval(Horizon::Positional), "D");
    }
}
