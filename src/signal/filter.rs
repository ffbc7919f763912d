use crate::config::SignalConfig;

/// Quality gate over a directional call.
///
/// Rejection uses strict less-than on both thresholds, so a value exactly
/// equal to the minimum passes. Kept as-is from the production rule.
pub fn passes_quality(expected_pnl_pct: f64, confidence_pct: f64, config: &SignalConfig) -> bool {
    !(expected_pnl_pct < config.min_expected_profit_pct
        || confidence_pct < config.min_confidence_pct)
}
