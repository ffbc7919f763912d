// Upstream price sources
//
// Each exchange client implements the provider traits; SourceChain walks an
// ordered list, first success wins, and converts exhaustion into the typed
// no-price / no-history errors.

pub mod binance;
pub mod bybit;

pub use binance::BinanceClient;
pub use bybit::BybitClient;

use crate::error::SignalError;
use crate::models::{Bar, Horizon, PriceQuote};
use crate::Result;
use async_trait::async_trait;

/// Current-price source
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Provider name, used in logs and quote records
    fn name(&self) -> &'static str;

    /// Latest traded price for the symbol
    async fn get_price(&self, symbol: &str) -> Result<f64>;
}

/// Historical-bar source
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Provider name, used in logs and error reports
    fn name(&self) -> &'static str;

    /// Up to `limit` bars at the horizon's interval, oldest first
    async fn fetch_bars(&self, symbol: &str, horizon: Horizon, limit: usize) -> Result<Vec<Bar>>;
}

/// Ordered provider lists with first-success-wins fallback. Failures are
/// logged and the next provider tried; stale data is never substituted.
pub struct SourceChain {
    quotes: Vec<Box<dyn QuoteProvider>>,
    bars: Vec<Box<dyn BarProvider>>,
}

impl SourceChain {
    pub fn new(quotes: Vec<Box<dyn QuoteProvider>>, bars: Vec<Box<dyn BarProvider>>) -> Self {
        Self { quotes, bars }
    }

    /// Fresh quote from the first provider that answers.
    pub async fn get_price(&self, symbol: &str) -> Result<PriceQuote> {
        for provider in &self.quotes {
            match provider.get_price(symbol).await {
                Ok(price) => {
                    return Ok(PriceQuote {
                        price,
                        source: provider.name().to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        symbol,
                        error = %e,
                        "quote fetch failed, trying next source"
                    );
                }
            }
        }

        Err(SignalError::NoPrice {
            symbol: symbol.to_string(),
            providers: join_names(self.quotes.iter().map(|p| p.name())),
        })
    }

    /// Bar history from the first provider that answers.
    pub async fn fetch_bars(
        &self,
        symbol: &str,
        horizon: Horizon,
        limit: usize,
    ) -> Result<Vec<Bar>> {
        for provider in &self.bars {
            match provider.fetch_bars(symbol, horizon, limit).await {
                Ok(bars) => return Ok(bars),
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        symbol,
                        horizon = %horizon,
                        error = %e,
                        "history fetch failed, trying next source"
                    );
                }
            }
        }

        Err(SignalError::NoHistory {
            symbol: symbol.to_string(),
            horizon,
            providers: join_names(self.bars.iter().map(|p| p.name())),
        })
    }
}

impl Default for SourceChain {
    /// Production order: Binance first, Bybit as fallback.
    fn default() -> Self {
        Self::new(
            vec![
                Box::new(BinanceClient::new()),
                Box::new(BybitClient::new()),
            ],
            vec![
                Box::new(BinanceClient::new()),
                Box::new(BybitClient::new()),
            ],
        )
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// "BTC/USDT" -> "BTCUSDT", the spot symbol form both exchanges use.
pub(crate) fn spot_symbol(symbol: &str) -> String {
    symbol.replace('/', "").to_uppercase()
}
