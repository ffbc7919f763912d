use super::TargetStrategy;
use crate::models::Side;

/// Reference target: entry plus/minus a fixed minimum-profit percentage.
pub struct MinimumProfitTarget {
    pub pct: f64,
}

impl MinimumProfitTarget {
    pub fn new(pct: f64) -> Self {
        Self { pct }
    }
}

impl Default for MinimumProfitTarget {
    fn default() -> Self {
        Self { pct: 3.0 }
    }
}

impl TargetStrategy for MinimumProfitTarget {
    fn name(&self) -> &'static str {
        "minimum-profit"
    }

    fn target(&self, entry: f64, side: Side) -> f64 {
        let p = self.pct / 100.0;
        match side {
            Side::Long => entry * (1.0 + p),
            Side::Short => entry * (1.0 - p),
            Side::NoEntry => entry,
        }
    }
}
