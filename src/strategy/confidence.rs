use super::ConfidenceStrategy;
use crate::models::Horizon;

/// Reference confidence: a constant, regardless of symbol or horizon.
pub struct FixedConfidence {
    pub value: f64,
}

impl FixedConfidence {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Default for FixedConfidence {
    fn default() -> Self {
        Self { value: 70.0 }
    }
}

impl ConfidenceStrategy for FixedConfidence {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn confidence(&self, _symbol: &str, _horizon: Horizon) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_value() {
        let strategy = FixedConfidence::default();
        assert_eq!(strategy.confidence("BTC/USDT", Horizon::Swing), 70.0);
        assert_eq!(strategy.confidence("ETH/USDT", Horizon::Positional), 70.0);
    }
}
