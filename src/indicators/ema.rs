/// Exponential Moving Average, seeded with the SMA of the first `period`
/// values (same convention pandas-ta uses).
///
/// Returns one slot per input value; slots before the first full window
/// are None.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut ema: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(ema);

    let multiplier = 2.0 / (period as f64 + 1.0);
    for i in period..values.len() {
        ema = (values[i] - ema) * multiplier + ema;
        out[i] = Some(ema);
    }

    out
}
