// Orchestration loop
//
// One pass over the active symbol set: quote, then one pipeline run per
// horizon. Per-symbol and per-horizon failures are contained and recorded;
// registry and sink failures abort the pass after a terminal log entry.

use crate::api::SourceChain;
use crate::config::WorkerConfig;
use crate::error::SignalError;
use crate::models::{Horizon, PriceQuote, SignalDecision};
use crate::signal::SignalPipeline;
use crate::storage::{DecisionSink, StatusLog, SymbolRegistry};
use crate::Result;
use chrono::Utc;
use std::sync::Arc;

/// What happened to one unit of work
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    Emitted(SignalDecision),
    Failed(String),
}

/// One unit of work: a symbol, or a (symbol, horizon) pair.
/// `horizon: None` means the whole symbol failed before horizon work.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    pub symbol: String,
    pub horizon: Option<Horizon>,
    pub outcome: UnitOutcome,
}

/// Per-unit outcomes for a completed pass
#[derive(Debug, Default)]
pub struct PassReport {
    pub units: Vec<UnitReport>,
}

impl PassReport {
    pub fn emitted(&self) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u.outcome, UnitOutcome::Emitted(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.units.len() - self.emitted()
    }
}

/// The worker: owns the collaborator handles and drives one pass at a time.
pub struct Worker {
    registry: Arc<dyn SymbolRegistry>,
    sink: Arc<dyn DecisionSink>,
    log: Arc<dyn StatusLog>,
    sources: SourceChain,
    pipeline: SignalPipeline,
    config: WorkerConfig,
}

impl Worker {
    pub fn new(
        registry: Arc<dyn SymbolRegistry>,
        sink: Arc<dyn DecisionSink>,
        log: Arc<dyn StatusLog>,
        sources: SourceChain,
        pipeline: SignalPipeline,
        config: WorkerConfig,
    ) -> Self {
        Self {
            registry,
            sink,
            log,
            sources,
            pipeline,
            config,
        }
    }

    /// One pass: sequential, one symbol and one horizon at a time.
    pub async fn run_pass(&self) -> Result<PassReport> {
        self.log.append_log(Utc::now(), "JOB INICIADO").await;
        tracing::info!("pass started");

        let symbols = match self.registry.active_symbols().await {
            Ok(symbols) => symbols,
            Err(e) => return self.abort_pass(e).await,
        };

        let symbols = if symbols.is_empty() {
            // An empty registry would make the job a silent no-op; fall back
            // to one default symbol so the pass still produces output.
            tracing::warn!(
                fallback = %self.config.default_symbol,
                "no active symbols in registry, using default"
            );
            vec![self.config.default_symbol.clone()]
        } else {
            symbols
        };

        tracing::info!(symbols = symbols.len(), "active symbol set loaded");

        let mut report = PassReport::default();

        for symbol in &symbols {
            let quote = match self.sources.get_price(symbol).await {
                Ok(quote) => quote,
                Err(e) => {
                    tracing::error!(symbol = %symbol, error = %e, "skipping symbol: no quote");
                    report.units.push(UnitReport {
                        symbol: symbol.clone(),
                        horizon: None,
                        outcome: UnitOutcome::Failed(e.to_string()),
                    });
                    continue;
                }
            };

            tracing::info!(
                symbol = %symbol,
                price = quote.price,
                source = %quote.source,
                "quote fetched"
            );

            for horizon in Horizon::ALL {
                match self.process_horizon(symbol, horizon, &quote).await {
                    Ok(decision) => {
                        tracing::info!(
                            symbol = %symbol,
                            horizon = %horizon,
                            side = %decision.side,
                            status = %decision.status,
                            "decision emitted"
                        );
                        report.units.push(UnitReport {
                            symbol: symbol.clone(),
                            horizon: Some(horizon),
                            outcome: UnitOutcome::Emitted(decision),
                        });
                    }
                    Err(e @ SignalError::Persistence(_)) => {
                        // A broken sink invalidates the rest of the pass
                        return self.abort_pass(e).await;
                    }
                    Err(e) => {
                        tracing::error!(symbol = %symbol, horizon = %horizon, error = %e, "horizon failed");
                        report.units.push(UnitReport {
                            symbol: symbol.clone(),
                            horizon: Some(horizon),
                            outcome: UnitOutcome::Failed(e.to_string()),
                        });
                    }
                }
            }
        }

        self.log.append_log(Utc::now(), "JOB OK").await;
        tracing::info!(
            emitted = report.emitted(),
            failed = report.failed(),
            "pass finished"
        );
        Ok(report)
    }

    async fn process_horizon(
        &self,
        symbol: &str,
        horizon: Horizon,
        quote: &PriceQuote,
    ) -> Result<SignalDecision> {
        let bars = self
            .sources
            .fetch_bars(symbol, horizon, self.config.history_limit)
            .await?;
        let decision = self.pipeline.evaluate(symbol, horizon, &bars)?;
        self.sink
            .append_decision(symbol, horizon, &decision, quote.price, Utc::now())
            .await?;
        Ok(decision)
    }

    /// Terminal log entry, then propagate the fatal error to the caller.
    async fn abort_pass(&self, error: SignalError) -> Result<PassReport> {
        tracing::error!(error = %error, "pass aborted");
        self.log
            .append_log(Utc::now(), &format!("JOB ERRO: {error}"))
            .await;
        Err(error)
    }
}
