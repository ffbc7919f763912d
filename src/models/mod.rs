use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLCV price bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Holding-period regime. Each horizon is bound to one fixed bar interval;
/// the mapping is not configurable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    /// 4-hour bars
    Swing,
    /// 1-day bars
    Positional,
}

impl Horizon {
    pub const ALL: [Horizon; 2] = [Horizon::Swing, Horizon::Positional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Swing => "SWING",
            Horizon::Positional => "POSITIONAL",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade direction call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
    NoEntry,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "LONG",
            Side::Short => "SHORT",
            Side::NoEntry => "NO_ENTRY",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the filtering stages. The strings match the sheet vocabulary
/// the rest of the system expects, so they are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStatus {
    /// Passed direction and quality filters ("Apto")
    Qualified,
    /// Direction filter returned no entry ("Fora dos filtros")
    DirectionFiltered,
    /// Directional call rejected by the quality gate ("Reprovado por filtros")
    QualityRejected,
}

impl SignalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStatus::Qualified => "Apto",
            SignalStatus::DirectionFiltered => "Fora dos filtros",
            SignalStatus::QualityRejected => "Reprovado por filtros",
        }
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable trade recommendation for one (symbol, horizon) in one pass.
///
/// Prices are rounded to 3 decimals and percentages to 2 by the decision
/// builder; nothing mutates the record after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub side: Side,
    pub entry_price: f64,
    pub stop_price: f64,
    pub target_price: f64,
    pub expected_pnl_pct: f64,
    pub confidence_pct: f64,
    pub status: SignalStatus,
}

/// Current price plus the provider that served it. Produced fresh every
/// cycle, never cached across passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: f64,
    pub source: String,
}

/// Row shape of the symbol registry. The registry is owned and mutated by
/// the external persistence collaborator; the core only reads the active
/// subset once per pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub active: bool,
}
