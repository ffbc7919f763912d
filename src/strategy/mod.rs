// Pluggable target / confidence models
//
// Both reference implementations are deliberate placeholders: the target is a
// flat minimum-profit percentage and the confidence a constant, pending the
// statistical models that will replace them. The traits are the stable seam.

pub mod confidence;
pub mod target;

pub use confidence::FixedConfidence;
pub use target::MinimumProfitTarget;

use crate::models::{Horizon, Side};

/// Produces a profit target from entry price and direction
pub trait TargetStrategy: Send + Sync {
    /// Strategy name, for logging
    fn name(&self) -> &'static str;

    /// Target price for the given entry and side.
    /// For `Side::NoEntry` the target is the entry itself.
    fn target(&self, entry: f64, side: Side) -> f64;
}

/// Produces a confidence score (percent) for a directional call
pub trait ConfidenceStrategy: Send + Sync {
    /// Strategy name, for logging
    fn name(&self) -> &'static str;

    /// Estimated probability (percent) that the call plays out
    fn confidence(&self, symbol: &str, horizon: Horizon) -> f64;
}
