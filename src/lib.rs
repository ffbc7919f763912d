// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod signal;
pub mod storage;
pub mod strategy;
pub mod worker;

// Re-export commonly used types
pub use config::{SignalConfig, WorkerConfig};
pub use error::SignalError;
pub use models::*;
pub use signal::SignalPipeline;

// Error handling
pub type Result<T> = std::result::Result<T, SignalError>;
