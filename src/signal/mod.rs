// Signal decision pipeline
//
// indicators -> direction classifier -> target/stop -> quality gate -> one
// immutable SignalDecision per (symbol, horizon).

pub mod classifier;
pub mod filter;
pub mod levels;

pub use classifier::classify;
pub use filter::passes_quality;
pub use levels::{expected_pnl_pct, stop_price};

use crate::config::SignalConfig;
use crate::indicators::{self, IndicatorRow};
use crate::models::{Bar, Horizon, Side, SignalDecision, SignalStatus};
use crate::strategy::{ConfidenceStrategy, FixedConfidence, MinimumProfitTarget, TargetStrategy};
use crate::Result;

/// The full decision pipeline with its configuration and pluggable models.
pub struct SignalPipeline {
    config: SignalConfig,
    target: Box<dyn TargetStrategy>,
    confidence: Box<dyn ConfidenceStrategy>,
}

impl SignalPipeline {
    /// Pipeline with the reference placeholder strategies. The target
    /// percentage follows the quality-gate minimum, as in production.
    pub fn new(config: SignalConfig) -> Self {
        let target = Box::new(MinimumProfitTarget::new(config.min_expected_profit_pct));
        let confidence = Box::new(FixedConfidence::default());
        Self {
            config,
            target,
            confidence,
        }
    }

    /// Pipeline with caller-supplied strategies.
    pub fn with_strategies(
        config: SignalConfig,
        target: Box<dyn TargetStrategy>,
        confidence: Box<dyn ConfidenceStrategy>,
    ) -> Self {
        Self {
            config,
            target,
            confidence,
        }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Run the whole pipeline over a raw bar series. The last complete
    /// indicator row drives the decision.
    pub fn evaluate(&self, symbol: &str, horizon: Horizon, bars: &[Bar]) -> Result<SignalDecision> {
        let rows = indicators::enrich(bars, &self.config)?;
        // enrich never returns an empty vec
        let last = rows.last().ok_or_else(|| {
            crate::SignalError::Data("indicator engine returned no rows".to_string())
        })?;

        let decision = self.decide(symbol, horizon, last);
        tracing::debug!(
            symbol,
            horizon = %horizon,
            side = %decision.side,
            status = %decision.status,
            "pipeline decision"
        );
        Ok(decision)
    }

    /// Decide from a single indicator snapshot. Pure and deterministic;
    /// split out from `evaluate` so the stages are testable without bars.
    pub fn decide(&self, symbol: &str, horizon: Horizon, row: &IndicatorRow) -> SignalDecision {
        let entry = row.close;
        let side = classify(row, &self.config);

        if side == Side::NoEntry {
            return self.flat_decision(entry, SignalStatus::DirectionFiltered, 0.0, 0.0);
        }

        let target = self.target.target(entry, side);
        let stop = stop_price(entry, side, row.atr, &self.config);
        let pnl_pct = expected_pnl_pct(entry, target, side);
        let confidence = self.confidence.confidence(symbol, horizon);

        if !passes_quality(pnl_pct, confidence, &self.config) {
            return self.flat_decision(entry, SignalStatus::QualityRejected, pnl_pct, confidence);
        }

        SignalDecision {
            side,
            entry_price: self.round_price(entry),
            stop_price: self.round_price(stop),
            target_price: self.round_price(target),
            expected_pnl_pct: self.round_pct(pnl_pct),
            confidence_pct: self.round_pct(confidence),
            status: SignalStatus::Qualified,
        }
    }

    /// No-trade decision: target and stop collapse to the entry.
    fn flat_decision(
        &self,
        entry: f64,
        status: SignalStatus,
        pnl_pct: f64,
        confidence: f64,
    ) -> SignalDecision {
        let entry = self.round_price(entry);
        SignalDecision {
            side: Side::NoEntry,
            entry_price: entry,
            stop_price: entry,
            target_price: entry,
            expected_pnl_pct: self.round_pct(pnl_pct),
            confidence_pct: self.round_pct(confidence),
            status,
        }
    }

    fn round_price(&self, value: f64) -> f64 {
        round_to(value, self.config.price_decimals)
    }

    fn round_pct(&self, value: f64) -> f64 {
        round_to(value, self.config.pct_decimals)
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
