// External collaborator contracts
//
// The registry, decision sink and status log are owned by the surrounding
// system (dashboard, sheet exports, manual entry forms); the core only
// consumes these trait contracts. PostgresStore is the production
// implementation of all three.

pub mod postgres;

pub use postgres::PostgresStore;

use crate::models::{Horizon, SignalDecision};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read-only view of the active symbol set
#[async_trait]
pub trait SymbolRegistry: Send + Sync {
    /// Active symbols in registry order
    async fn active_symbols(&self) -> Result<Vec<String>>;
}

/// Destination for emitted decisions. Dedup/idempotency is the sink's
/// responsibility, not the core's.
#[async_trait]
pub trait DecisionSink: Send + Sync {
    async fn append_decision(
        &self,
        symbol: &str,
        horizon: Horizon,
        decision: &SignalDecision,
        current_price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<()>;
}

/// Job status log ("JOB INICIADO" / "JOB OK" / "JOB ERRO: ...").
/// Infallible to callers: implementations swallow and trace their own
/// failures so logging can never abort the pipeline.
#[async_trait]
pub trait StatusLog: Send + Sync {
    async fn append_log(&self, timestamp: DateTime<Utc>, message: &str);
}
