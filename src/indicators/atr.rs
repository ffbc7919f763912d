//! Average True Range (ATR)
//!
//! Measures volatility as the Wilder-smoothed average of true ranges.
//! True Range is the greatest of:
//! - Current High - Current Low
//! - Abs(Current High - Previous Close)
//! - Abs(Current Low - Previous Close)

use crate::models::Bar;

/// True range per bar transition. Output has `bars.len() - 1` entries;
/// entry `i` belongs to bar `i + 1`.
pub(crate) fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len().saturating_sub(1));
    for i in 1..bars.len() {
        let high = bars[i].high;
        let low = bars[i].low;
        let prev_close = bars[i - 1].close;

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
        out.push(tr);
    }
    out
}

/// ATR aligned with the input bars. The first value appears at index
/// `period` (one bar is consumed forming the first true range); earlier
/// slots are None.
pub fn atr_series(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; bars.len()];
    if period == 0 || bars.len() < period + 1 {
        return out;
    }

    let trs = true_ranges(bars);

    // First ATR is the simple average of the first `period` true ranges,
    // then Wilder's smoothing takes over.
    let mut atr: f64 = trs[..period].iter().sum::<f64>() / period as f64;
    out[period] = Some(atr);

    for i in period..trs.len() {
        atr = (atr * (period as f64 - 1.0) + trs[i]) / period as f64;
        out[i + 1] = Some(atr);
    }

    out
}
