use crate::models::Horizon;
use thiserror::Error;

/// Error taxonomy for the signal core.
///
/// The Display strings start with the error kind so terminal log entries
/// ("JOB ERRO: <kind>: <detail>") are greppable by external monitoring.
#[derive(Debug, Error)]
pub enum SignalError {
    /// Malformed or insufficient bar series.
    #[error("DataError: {0}")]
    Data(String),

    /// Every configured quote provider was tried and failed.
    #[error("NoPriceError: no quote for {symbol} (tried: {providers})")]
    NoPrice { symbol: String, providers: String },

    /// Every configured bar provider was tried and failed.
    #[error("NoHistoryError: no {horizon} bars for {symbol} (tried: {providers})")]
    NoHistory {
        symbol: String,
        horizon: Horizon,
        providers: String,
    },

    /// Sink write failed. Fatal for the current pass.
    #[error("PersistenceError: {0}")]
    Persistence(String),

    /// Active-symbol set could not be loaded. Fatal for the current pass.
    #[error("RegistryError: {0}")]
    Registry(String),

    /// A single upstream provider failed. Consumed by the fallback chain,
    /// which converts exhaustion into NoPrice/NoHistory.
    #[error("ProviderError: {provider}: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },
}

impl SignalError {
    pub fn provider(provider: &'static str, message: impl ToString) -> Self {
        SignalError::Provider {
            provider,
            message: message.to_string(),
        }
    }
}
