use super::{DecisionSink, StatusLog, SymbolRegistry};
use crate::error::SignalError;
use crate::models::{Horizon, SignalDecision};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

/// Postgres persistence: symbol registry, decision rows and the job log
#[derive(Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to Postgres
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| SignalError::Persistence(format!("connect: {e}")))?;

        tracing::info!("Connected to Postgres");

        Ok(Self { pool })
    }

    /// Create the tables if they do not exist. A failure here is fatal for
    /// the pass; the caller aborts before any symbol work starts.
    pub async fn init_schema(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS moedas (
                id SERIAL PRIMARY KEY,
                simbolo TEXT UNIQUE NOT NULL,
                ativo BOOLEAN NOT NULL DEFAULT TRUE,
                observacao TEXT,
                created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
                updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS sinais (
                id SERIAL PRIMARY KEY,
                simbolo TEXT NOT NULL,
                horizonte TEXT NOT NULL,
                side TEXT NOT NULL,
                entrada NUMERIC(18,8) NOT NULL,
                stop NUMERIC(18,8) NOT NULL,
                alvo NUMERIC(18,8) NOT NULL,
                pnl_pct DOUBLE PRECISION NOT NULL,
                assertividade_pct DOUBLE PRECISION NOT NULL,
                situacao TEXT NOT NULL,
                preco_atual NUMERIC(18,8) NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS log (
                id SERIAL PRIMARY KEY,
                data TEXT NOT NULL,
                hora TEXT NOT NULL,
                status TEXT NOT NULL
            )
            "#,
        ];

        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| SignalError::Persistence(format!("init schema: {e}")))?;
        }

        tracing::info!("Database schema verified");
        Ok(())
    }
}

#[async_trait]
impl SymbolRegistry for PostgresStore {
    async fn active_symbols(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT simbolo FROM moedas WHERE ativo = TRUE ORDER BY simbolo")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SignalError::Registry(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("simbolo")
                    .map_err(|e| SignalError::Registry(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl DecisionSink for PostgresStore {
    async fn append_decision(
        &self,
        symbol: &str,
        horizon: Horizon,
        decision: &SignalDecision,
        current_price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sinais (
                simbolo, horizonte, side, entrada, stop, alvo,
                pnl_pct, assertividade_pct, situacao, preco_atual, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(symbol)
        .bind(horizon.as_str())
        .bind(decision.side.as_str())
        .bind(decision.entry_price)
        .bind(decision.stop_price)
        .bind(decision.target_price)
        .bind(decision.expected_pnl_pct)
        .bind(decision.confidence_pct)
        .bind(decision.status.as_str())
        .bind(current_price)
        .bind(timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| SignalError::Persistence(format!("append decision: {e}")))?;

        tracing::debug!(symbol, horizon = %horizon, "decision row written");
        Ok(())
    }
}

#[async_trait]
impl StatusLog for PostgresStore {
    async fn append_log(&self, timestamp: DateTime<Utc>, message: &str) {
        // Same (DATA, HORA, STATUS) shape as the original log sheet
        let result = sqlx::query("INSERT INTO log (data, hora, status) VALUES ($1, $2, $3)")
            .bind(timestamp.format("%Y-%m-%d").to_string())
            .bind(timestamp.format("%H:%M").to_string())
            .bind(message)
            .execute(&self.pool)
            .await;

        if let Err(e) = result {
            tracing::error!(error = %e, message, "failed to append status log entry");
        }
    }
}
