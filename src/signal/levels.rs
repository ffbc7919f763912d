use crate::config::SignalConfig;
use crate::models::Side;

/// Protective stop from entry, direction and volatility: `k * ATR` away from
/// the entry, floored at zero on the long side. NoEntry keeps the entry.
pub fn stop_price(entry: f64, side: Side, atr: f64, config: &SignalConfig) -> f64 {
    match side {
        Side::Long => (entry - config.atr_stop_mult * atr).max(0.0),
        Side::Short => entry + config.atr_stop_mult * atr,
        Side::NoEntry => entry,
    }
}

/// Percentage gain from entry to target, sign-adjusted so a favorable move
/// is positive for both sides. NoEntry is always 0.
pub fn expected_pnl_pct(entry: f64, target: f64, side: Side) -> f64 {
    match side {
        Side::Long => (target / entry - 1.0) * 100.0,
        Side::Short => (1.0 - target / entry) * 100.0,
        Side::NoEntry => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_stop_below_entry() {
        let cfg = SignalConfig::default();
        let stop = stop_price(100.0, Side::Long, 2.0, &cfg);
        assert!((stop - 97.0).abs() < 1e-9);
        assert!(stop <= 100.0);
    }

    #[test]
    fn test_short_stop_above_entry() {
        let cfg = SignalConfig::default();
        let stop = stop_price(100.0, Side::Short, 2.0, &cfg);
        assert!((stop - 103.0).abs() < 1e-9);
        assert!(stop >= 100.0);
    }

    #[test]
    fn test_long_stop_floored_at_zero() {
        let cfg = SignalConfig::default();
        // ATR larger than the price itself
        let stop = stop_price(1.0, Side::Long, 10.0, &cfg);
        assert_eq!(stop, 0.0);
    }

    #[test]
    fn test_no_entry_stop_is_entry() {
        let cfg = SignalConfig::default();
        assert_eq!(stop_price(100.0, Side::NoEntry, 2.0, &cfg), 100.0);
    }

    #[test]
    fn test_pnl_sign_adjustment() {
        // Long: target above entry is a gain
        assert!((expected_pnl_pct(100.0, 103.0, Side::Long) - 3.0).abs() < 1e-9);
        // Short: target below entry is a gain too
        assert!((expected_pnl_pct(50.0, 48.5, Side::Short) - 3.0).abs() < 1e-9);
        // Adverse target shows up negative
        assert!(expected_pnl_pct(100.0, 98.0, Side::Long) < 0.0);
        assert!(expected_pnl_pct(100.0, 102.0, Side::Short) < 0.0);
    }
}
