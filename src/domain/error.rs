//! Domain error types.

use chrono::{DateTime, Utc};

/// Top-level error type for gbce.
#[derive(Debug, thiserror::Error)]
pub enum GbceError {
    #[error("invalid stock symbol: {symbol:?}")]
    InvalidSymbol { symbol: String },

    #[error("{symbol}: invalid price: {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("{symbol}: invalid quantity: {quantity}")]
    InvalidQuantity { symbol: String, quantity: u64 },

    #[error("cannot trade {trade_symbol} as {stock_symbol}")]
    SymbolMismatch {
        trade_symbol: String,
        stock_symbol: String,
    },

    #[error("{symbol}: trade at {timestamp} precedes last trade at {last}")]
    OutOfOrderTrade {
        symbol: String,
        timestamp: DateTime<Utc>,
        last: DateTime<Utc>,
    },

    #[error("already registered: {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("stock {symbol} not found")]
    NotFound { symbol: String },

    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("catalog error: {reason}")]
    Catalog { reason: String },
}

impl GbceError {
    /// Process exit status for this error family.
    pub fn exit_status(&self) -> u8 {
        match self {
            GbceError::ConfigParse { .. }
            | GbceError::ConfigMissing { .. }
            | GbceError::ConfigInvalid { .. } => 2,
            GbceError::Catalog { .. } => 3,
            GbceError::InvalidSymbol { .. }
            | GbceError::InvalidPrice { .. }
            | GbceError::InvalidQuantity { .. }
            | GbceError::SymbolMismatch { .. }
            | GbceError::OutOfOrderTrade { .. } => 4,
            GbceError::DuplicateSymbol { .. }
            | GbceError::NotFound { .. }
            | GbceError::InsufficientData { .. } => 5,
        }
    }
}

impl From<&GbceError> for std::process::ExitCode {
    fn from(err: &GbceError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
