//! Executed trade records.

use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A single buy or sell execution. Immutable once recorded against a stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: u64,
    pub stock_symbol: String,
    pub quantity: u64,
    pub side: TradeSide,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Trade {
    /// price * quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
