/// Pipeline configuration. One immutable value passed into the pipeline
/// entry point; defaults mirror the production deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// Fast EMA length
    pub ema_fast: usize,
    /// Slow EMA length
    pub ema_slow: usize,
    /// ADX / DI length
    pub adx_len: usize,
    /// ATR length
    pub atr_len: usize,
    /// Stop distance in ATR multiples
    pub atr_stop_mult: f64,
    /// Minimum ADX for any directional call
    pub adx_min: f64,
    /// Quality gate: minimum expected profit, percent
    pub min_expected_profit_pct: f64,
    /// Quality gate: minimum confidence, percent
    pub min_confidence_pct: f64,
    /// Decimal places for price fields
    pub price_decimals: u32,
    /// Decimal places for percentage fields
    pub pct_decimals: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            ema_fast: 9,
            ema_slow: 21,
            adx_len: 14,
            atr_len: 14,
            atr_stop_mult: 1.5,
            adx_min: 20.0,
            min_expected_profit_pct: 3.0,
            min_confidence_pct: 65.0,
            price_decimals: 3,
            pct_decimals: 2,
        }
    }
}

impl SignalConfig {
    /// Minimum bar count for the longest indicator lookback. A shorter
    /// series cannot produce a single complete indicator row.
    pub fn min_bars(&self) -> usize {
        self.ema_slow.max(self.adx_len).max(self.atr_len) + 1
    }
}

/// Worker-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    /// Bars requested per history fetch
    pub history_limit: usize,
    /// Symbol processed when the registry has no active entries
    pub default_symbol: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            history_limit: 400,
            default_symbol: "BTC/USDT".to_string(),
        }
    }
}
