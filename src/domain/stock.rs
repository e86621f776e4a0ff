//! Stock entity: shared price/trade-log state plus the variant's dividend terms.

use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::fmt;

use super::error::GbceError;
use super::pricing::{self, DEFAULT_VWAP_WINDOW};
use super::trade::Trade;

pub const SYMBOL_LEN: usize = 3;

/// Exactly three ASCII uppercase letters. Longer strings with a valid
/// three-letter prefix are rejected.
pub fn is_valid_symbol(symbol: &str) -> bool {
    symbol.len() == SYMBOL_LEN && symbol.bytes().all(|b| b.is_ascii_uppercase())
}

/// Finite and non-negative.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// Dividend terms, one shape per stock variant.
#[derive(Debug, Clone, PartialEq)]
pub enum StockKind {
    Common {
        last_dividend: f64,
    },
    Preferred {
        /// e.g. 0.02 for 2%
        fixed_dividend_ratio: f64,
        par_value: f64,
    },
}

impl StockKind {
    /// Dividend paid per share, before dividing by price.
    pub fn dividend(&self) -> f64 {
        match *self {
            StockKind::Common { last_dividend } => last_dividend,
            StockKind::Preferred {
                fixed_dividend_ratio,
                par_value,
            } => fixed_dividend_ratio * par_value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockKind::Common { .. } => "common",
            StockKind::Preferred { .. } => "preferred",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            StockKind::Common { .. } => 0,
            StockKind::Preferred { .. } => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stock {
    symbol: String,
    price: f64,
    trades: Vec<Trade>,
    kind: StockKind,
}

impl Stock {
    pub fn new(symbol: &str, price: f64, kind: StockKind) -> Result<Self, GbceError> {
        if !is_valid_symbol(symbol) {
            return Err(GbceError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        }
        if !is_valid_price(price) {
            return Err(GbceError::InvalidPrice {
                symbol: symbol.to_string(),
                price,
            });
        }
        Ok(Stock {
            symbol: symbol.to_string(),
            price,
            trades: Vec::new(),
            kind,
        })
    }

    pub fn common(symbol: &str, last_dividend: f64, price: f64) -> Result<Self, GbceError> {
        Self::new(symbol, price, StockKind::Common { last_dividend })
    }

    pub fn preferred(
        symbol: &str,
        fixed_dividend_ratio: f64,
        par_value: f64,
        price: f64,
    ) -> Result<Self, GbceError> {
        Self::new(
            symbol,
            price,
            StockKind::Preferred {
                fixed_dividend_ratio,
                par_value,
            },
        )
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn last_trade(&self) -> Option<&Trade> {
        self.trades.last()
    }

    pub fn kind(&self) -> &StockKind {
        &self.kind
    }

    /// Dividend terms are freely editable; price and trade log are not.
    pub fn kind_mut(&mut self) -> &mut StockKind {
        &mut self.kind
    }

    pub fn is_common(&self) -> bool {
        matches!(self.kind, StockKind::Common { .. })
    }

    pub fn is_preferred(&self) -> bool {
        matches!(self.kind, StockKind::Preferred { .. })
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), GbceError> {
        if !is_valid_price(price) {
            return Err(GbceError::InvalidPrice {
                symbol: self.symbol.clone(),
                price,
            });
        }
        self.price = price;
        Ok(())
    }

    /// Records an executed trade. Every check, including the price update,
    /// happens before the append, so a rejected trade leaves no trace.
    pub fn add_trade(&mut self, trade: Trade) -> Result<(), GbceError> {
        if trade.stock_symbol != self.symbol {
            return Err(GbceError::SymbolMismatch {
                trade_symbol: trade.stock_symbol,
                stock_symbol: self.symbol.clone(),
            });
        }
        if trade.quantity == 0 {
            return Err(GbceError::InvalidQuantity {
                symbol: self.symbol.clone(),
                quantity: trade.quantity,
            });
        }
        if let Some(last) = self.trades.last() {
            if trade.timestamp < last.timestamp {
                return Err(GbceError::OutOfOrderTrade {
                    symbol: self.symbol.clone(),
                    timestamp: trade.timestamp,
                    last: last.timestamp,
                });
            }
        }

        self.set_price(trade.price)?;
        self.trades.push(trade);
        Ok(())
    }

    /// Volume-weighted price over the default 15 minute window ending at `now`.
    pub fn volume_weighted_price(&self, now: DateTime<Utc>) -> f64 {
        self.volume_weighted_price_over(now, DEFAULT_VWAP_WINDOW)
    }

    pub fn volume_weighted_price_over(&self, now: DateTime<Utc>, window: Duration) -> f64 {
        pricing::volume_weighted_price(&self.trades, now, window)
    }

    /// Dividend over price; 0 when the price is 0.
    pub fn dividend_yield(&self) -> f64 {
        if self.price == 0.0 {
            return 0.0;
        }
        self.kind.dividend() / self.price
    }
}

impl PartialEq for Stock {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.kind.rank() == other.kind.rank()
    }
}

impl Eq for Stock {}

impl PartialOrd for Stock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbol
            .cmp(&other.symbol)
            .then_with(|| self.kind.rank().cmp(&other.kind.rank()))
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.symbol, self.dividend_yield())
    }
}
