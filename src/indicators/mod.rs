// Technical indicators module
// EMA, ADX/DI and ATR plus the engine that augments a bar series

pub mod adx;
pub mod atr;
pub mod ema;

pub use adx::{adx_series, DirectionalSeries};
pub use atr::atr_series;
pub use ema::ema_series;

use crate::config::SignalConfig;
use crate::error::SignalError;
use crate::models::Bar;
use crate::Result;
use chrono::{DateTime, Utc};

/// One fully-populated indicator row. Rows are only produced where every
/// indicator has a complete lookback window, so no field is ever NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub atr: f64,
}

/// Augment a bar series with fast/slow EMA, ADX, +DI, -DI and ATR.
///
/// Rows lacking a full lookback window are dropped. Fails with a data error
/// when the series is out of order, shorter than the longest lookback, or
/// too short to yield a single complete row.
pub fn enrich(bars: &[Bar], config: &SignalConfig) -> Result<Vec<IndicatorRow>> {
    if !bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp) {
        return Err(SignalError::Data(
            "bar series timestamps are not strictly increasing".to_string(),
        ));
    }

    let min_bars = config.min_bars();
    if bars.len() < min_bars {
        return Err(SignalError::Data(format!(
            "need at least {} bars for the configured lookbacks, got {}",
            min_bars,
            bars.len()
        )));
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema_fast = ema_series(&closes, config.ema_fast);
    let ema_slow = ema_series(&closes, config.ema_slow);
    let directional = adx_series(bars, config.adx_len);
    let atr = atr_series(bars, config.atr_len);

    let mut rows = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let (Some(ema_fast), Some(ema_slow), Some(adx), Some(plus_di), Some(minus_di), Some(atr)) = (
            ema_fast[i],
            ema_slow[i],
            directional.adx[i],
            directional.plus_di[i],
            directional.minus_di[i],
            atr[i],
        ) else {
            continue;
        };

        rows.push(IndicatorRow {
            timestamp: bar.timestamp,
            close: bar.close,
            ema_fast,
            ema_slow,
            adx,
            plus_di,
            minus_di,
            atr,
        });
    }

    if rows.is_empty() {
        return Err(SignalError::Data(format!(
            "no complete indicator rows from {} bars (ADX warmup needs {})",
            bars.len(),
            config.adx_len * 2
        )));
    }

    Ok(rows)
}
