// Orchestration-loop behavior against in-memory collaborators: failure
// isolation per symbol/horizon, default-symbol fallback, fatal paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sinalbot::api::{BarProvider, QuoteProvider, SourceChain};
use sinalbot::signal::SignalPipeline;
use sinalbot::storage::{DecisionSink, StatusLog, SymbolRegistry};
use sinalbot::worker::{UnitOutcome, Worker};
use sinalbot::{
    Bar, Horizon, Result, Side, SignalConfig, SignalDecision, SignalError, WorkerConfig,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct FakeRegistry {
    symbols: Vec<String>,
}

#[async_trait]
impl SymbolRegistry for FakeRegistry {
    async fn active_symbols(&self) -> Result<Vec<String>> {
        Ok(self.symbols.clone())
    }
}

struct BrokenRegistry;

#[async_trait]
impl SymbolRegistry for BrokenRegistry {
    async fn active_symbols(&self) -> Result<Vec<String>> {
        Err(SignalError::Registry("connection refused".to_string()))
    }
}

#[derive(Default)]
struct MemorySink {
    rows: Mutex<Vec<(String, Horizon, SignalDecision, f64)>>,
    fail: bool,
}

#[async_trait]
impl DecisionSink for MemorySink {
    async fn append_decision(
        &self,
        symbol: &str,
        horizon: Horizon,
        decision: &SignalDecision,
        current_price: f64,
        _timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if self.fail {
            return Err(SignalError::Persistence("disk full".to_string()));
        }
        self.rows.lock().unwrap().push((
            symbol.to_string(),
            horizon,
            decision.clone(),
            current_price,
        ));
        Ok(())
    }
}

#[derive(Default)]
struct MemoryLog {
    entries: Mutex<Vec<String>>,
}

#[async_trait]
impl StatusLog for MemoryLog {
    async fn append_log(&self, _timestamp: DateTime<Utc>, message: &str) {
        self.entries.lock().unwrap().push(message.to_string());
    }
}

struct MapQuotes {
    prices: HashMap<String, f64>,
}

#[async_trait]
impl QuoteProvider for MapQuotes {
    fn name(&self) -> &'static str {
        "fake-quotes"
    }

    async fn get_price(&self, symbol: &str) -> Result<f64> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| SignalError::provider("fake-quotes", format!("no quote for {symbol}")))
    }
}

struct TrendBars {
    /// (symbol, horizon) pairs that fail instead of serving bars
    fail_for: Vec<(String, Horizon)>,
}

impl TrendBars {
    fn always_ok() -> Self {
        Self { fail_for: vec![] }
    }
}

#[async_trait]
impl BarProvider for TrendBars {
    fn name(&self) -> &'static str {
        "fake-bars"
    }

    async fn fetch_bars(&self, symbol: &str, horizon: Horizon, _limit: usize) -> Result<Vec<Bar>> {
        if self
            .fail_for
            .iter()
            .any(|(s, h)| s == symbol && *h == horizon)
        {
            return Err(SignalError::provider("fake-bars", "unavailable"));
        }
        Ok(trending_bars(60))
    }
}

fn trending_bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let base = 100.0 + 2.0 * i as f64;
            Bar {
                timestamp: Utc::now() + chrono::Duration::hours(4 * i as i64),
                open: base,
                high: base + 2.0,
                low: base - 1.0,
                close: base + 1.0,
                volume: 1000.0,
            }
        })
        .collect()
}

struct Fixture {
    sink: Arc<MemorySink>,
    log: Arc<MemoryLog>,
    worker: Worker,
}

fn build_worker(
    registry: Arc<dyn SymbolRegistry>,
    sink: Arc<MemorySink>,
    prices: &[(&str, f64)],
    failing_bars: Vec<(String, Horizon)>,
) -> Fixture {
    let log = Arc::new(MemoryLog::default());
    let quotes = MapQuotes {
        prices: prices
            .iter()
            .map(|(s, p)| (s.to_string(), *p))
            .collect(),
    };
    let sources = SourceChain::new(
        vec![Box::new(quotes)],
        vec![Box::new(TrendBars {
            fail_for: failing_bars,
        })],
    );

    let worker = Worker::new(
        registry,
        sink.clone(),
        log.clone(),
        sources,
        SignalPipeline::new(SignalConfig::default()),
        WorkerConfig::default(),
    );

    Fixture { sink, log, worker }
}

#[tokio::test]
async fn test_symbol_failure_does_not_stop_the_pass() {
    // "A" has no quote on any provider; "B" is healthy
    let registry = Arc::new(FakeRegistry {
        symbols: vec!["A".to_string(), "B".to_string()],
    });
    let fixture = build_worker(
        registry,
        Arc::new(MemorySink::default()),
        &[("B", 50_000.0)],
        vec![],
    );

    let report = fixture.worker.run_pass().await.unwrap();

    // One failed unit for A (whole symbol), two emitted for B
    assert_eq!(report.units.len(), 3);
    let a_unit = &report.units[0];
    assert_eq!(a_unit.symbol, "A");
    assert_eq!(a_unit.horizon, None);
    assert!(matches!(a_unit.outcome, UnitOutcome::Failed(_)));

    assert_eq!(report.emitted(), 2);
    let rows = fixture.sink.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|(symbol, _, _, _)| symbol == "B"));
    let horizons: Vec<Horizon> = rows.iter().map(|(_, h, _, _)| *h).collect();
    assert_eq!(horizons, vec![Horizon::Swing, Horizon::Positional]);

    let log = fixture.log.entries.lock().unwrap();
    assert_eq!(log.as_slice(), ["JOB INICIADO", "JOB OK"]);
}

#[tokio::test]
async fn test_empty_registry_falls_back_to_default_symbol() {
    let registry = Arc::new(FakeRegistry { symbols: vec![] });
    let fixture = build_worker(
        registry,
        Arc::new(MemorySink::default()),
        &[("BTC/USDT", 60_000.0)],
        vec![],
    );

    let report = fixture.worker.run_pass().await.unwrap();

    assert_eq!(report.units.len(), 2);
    assert!(report.units.iter().all(|u| u.symbol == "BTC/USDT"));
    assert_eq!(report.emitted(), 2);
}

#[tokio::test]
async fn test_horizon_failure_is_contained() {
    let registry = Arc::new(FakeRegistry {
        symbols: vec!["A".to_string()],
    });
    let fixture = build_worker(
        registry,
        Arc::new(MemorySink::default()),
        &[("A", 100.0)],
        vec![("A".to_string(), Horizon::Positional)],
    );

    let report = fixture.worker.run_pass().await.unwrap();

    assert_eq!(report.units.len(), 2);
    assert_eq!(report.emitted(), 1);

    let swing = &report.units[0];
    assert_eq!(swing.horizon, Some(Horizon::Swing));
    assert!(matches!(swing.outcome, UnitOutcome::Emitted(_)));

    let positional = &report.units[1];
    assert_eq!(positional.horizon, Some(Horizon::Positional));
    assert!(matches!(positional.outcome, UnitOutcome::Failed(_)));

    // Pass still terminates normally
    let log = fixture.log.entries.lock().unwrap();
    assert_eq!(log.last().unwrap(), "JOB OK");
}

#[tokio::test]
async fn test_registry_failure_is_fatal_and_logged() {
    let fixture = build_worker(
        Arc::new(BrokenRegistry),
        Arc::new(MemorySink::default()),
        &[],
        vec![],
    );

    let err = fixture.worker.run_pass().await.unwrap_err();
    assert!(matches!(err, SignalError::Registry(_)));

    let log = fixture.log.entries.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0], "JOB INICIADO");
    assert!(log[1].starts_with("JOB ERRO: RegistryError:"));
}

#[tokio::test]
async fn test_sink_failure_aborts_the_pass() {
    let registry = Arc::new(FakeRegistry {
        symbols: vec!["A".to_string(), "B".to_string()],
    });
    let sink = Arc::new(MemorySink {
        rows: Mutex::new(vec![]),
        fail: true,
    });
    let fixture = build_worker(registry, sink, &[("A", 100.0), ("B", 100.0)], vec![]);

    let err = fixture.worker.run_pass().await.unwrap_err();
    assert!(matches!(err, SignalError::Persistence(_)));

    let log = fixture.log.entries.lock().unwrap();
    assert!(log.last().unwrap().starts_with("JOB ERRO: PersistenceError:"));
}

#[tokio::test]
async fn test_emitted_decisions_are_qualified_longs() {
    // Steady uptrend bars: every emitted decision is a qualified long
    let registry = Arc::new(FakeRegistry {
        symbols: vec!["A".to_string()],
    });
    let fixture = build_worker(
        registry,
        Arc::new(MemorySink::default()),
        &[("A", 100.0)],
        vec![],
    );

    fixture.worker.run_pass().await.unwrap();

    let rows = fixture.sink.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    for (_, _, decision, price) in rows.iter() {
        assert_eq!(decision.side, Side::Long);
        assert_eq!(*price, 100.0);
        assert!(decision.stop_price <= decision.entry_price);
        assert!(decision.target_price > decision.entry_price);
    }
}
