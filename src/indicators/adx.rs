//! Average Directional Index (ADX) with +DI / -DI
//!
//! ADX measures trend strength (0-100); +DI and -DI give direction:
//! - ADX < 20: weak trend / choppy / ranging market
//! - +DI > -DI: uptrend, -DI > +DI: downtrend
//!
//! All smoothing is Wilder's, including the DX -> ADX stage, so the values
//! line up with standard charting output.

use super::atr::true_ranges;
use crate::models::Bar;

/// ADX, +DI and -DI aligned with the input bars.
///
/// +DI/-DI become available at bar index `period`; ADX needs a further
/// `period` DX values and first appears at index `2 * period - 1`.
pub struct DirectionalSeries {
    pub adx: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
}

/// Calculate ADX, +DI and -DI series for the given bars
pub fn adx_series(bars: &[Bar], period: usize) -> DirectionalSeries {
    let n = bars.len();
    let mut out = DirectionalSeries {
        adx: vec![None; n],
        plus_di: vec![None; n],
        minus_di: vec![None; n],
    };
    if period == 0 || n < period + 1 {
        return out;
    }

    // Directional movement per bar transition, aligned with true_ranges
    let trs = true_ranges(bars);
    let mut plus_dms = Vec::with_capacity(trs.len());
    let mut minus_dms = Vec::with_capacity(trs.len());

    for i in 1..n {
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;

        let plus_dm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus_dm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        plus_dms.push(plus_dm);
        minus_dms.push(minus_dm);
    }

    let smoothed_tr = wilder_series(&trs, period);
    let smoothed_plus = wilder_series(&plus_dms, period);
    let smoothed_minus = wilder_series(&minus_dms, period);

    // DX values, collected densely for the ADX smoothing stage
    let mut dxs = Vec::new();

    for j in 0..trs.len() {
        let (Some(tr), Some(pdm), Some(mdm)) = (smoothed_tr[j], smoothed_plus[j], smoothed_minus[j])
        else {
            continue;
        };

        let plus_di = if tr > 0.0 { (pdm / tr) * 100.0 } else { 0.0 };
        let minus_di = if tr > 0.0 { (mdm / tr) * 100.0 } else { 0.0 };

        let bar_idx = j + 1;
        out.plus_di[bar_idx] = Some(plus_di);
        out.minus_di[bar_idx] = Some(minus_di);

        let di_sum = plus_di + minus_di;
        let dx = if di_sum > 0.0 {
            ((plus_di - minus_di).abs() / di_sum) * 100.0
        } else {
            0.0
        };
        dxs.push((bar_idx, dx));
    }

    let dx_values: Vec<f64> = dxs.iter().map(|&(_, dx)| dx).collect();
    let adx_smoothed = wilder_series(&dx_values, period);
    for (m, adx) in adx_smoothed.into_iter().enumerate() {
        if let Some(adx) = adx {
            out.adx[dxs[m].0] = Some(adx);
        }
    }

    out
}

/// Wilder's smoothing: seeded with a simple average of the first `period`
/// values, then `(prev * (period - 1) + value) / period` for the rest.
/// Slots before the seed are None.
fn wilder_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut smoothed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(smoothed);

    for i in period..values.len() {
        smoothed = (smoothed * (period as f64 - 1.0) + values[i]) / period as f64;
        out[i] = Some(smoothed);
    }

    out
}
