//! Market registry: owns the stocks, allocates trade ids and routes trades.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use super::analytics::geometric_mean;
use super::config::MarketConfig;
use super::error::GbceError;
use super::stock::Stock;
use super::trade::{Trade, TradeSide};
use crate::adapters::clock::SystemClock;
use crate::ports::clock_port::ClockPort;

/// Outcome of a batch price update. Unknown symbols are reported, not fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceUpdateReport {
    pub updated: Vec<String>,
    pub unknown: Vec<String>,
}

impl PriceUpdateReport {
    pub fn is_complete(&self) -> bool {
        self.unknown.is_empty()
    }
}

pub struct Market {
    stocks: BTreeMap<String, Stock>,
    next_trade_id: u64,
    config: MarketConfig,
    clock: Box<dyn ClockPort>,
}

impl Market {
    pub fn new(config: MarketConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: MarketConfig, clock: Box<dyn ClockPort>) -> Self {
        Market {
            stocks: BTreeMap::new(),
            next_trade_id: 1,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Id the next successful trade will receive.
    pub fn next_trade_id(&self) -> u64 {
        self.next_trade_id
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Registered stocks in symbol order.
    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.values()
    }

    pub fn register(&mut self, stock: Stock) -> Result<(), GbceError> {
        if self.stocks.contains_key(stock.symbol()) {
            return Err(GbceError::DuplicateSymbol {
                symbol: stock.symbol().to_string(),
            });
        }
        tracing::debug!(symbol = stock.symbol(), kind = stock.kind().label(), "registered stock");
        self.stocks.insert(stock.symbol().to_string(), stock);
        Ok(())
    }

    pub fn find(&self, symbol: &str) -> Result<&Stock, GbceError> {
        self.stocks.get(symbol).ok_or_else(|| GbceError::NotFound {
            symbol: symbol.to_string(),
        })
    }

    pub fn find_mut(&mut self, symbol: &str) -> Result<&mut Stock, GbceError> {
        self.stocks.get_mut(symbol).ok_or_else(|| GbceError::NotFound {
            symbol: symbol.to_string(),
        })
    }

    pub fn buy_now(&mut self, symbol: &str, quantity: u64, price: f64) -> Result<u64, GbceError> {
        self.trade_now(symbol, quantity, price, TradeSide::Buy)
    }

    pub fn sell_now(&mut self, symbol: &str, quantity: u64, price: f64) -> Result<u64, GbceError> {
        self.trade_now(symbol, quantity, price, TradeSide::Sell)
    }

    /// Records a trade at the clock's current time and returns its id.
    /// The id counter only advances once the stock has accepted the trade.
    fn trade_now(
        &mut self,
        symbol: &str,
        quantity: u64,
        price: f64,
        side: TradeSide,
    ) -> Result<u64, GbceError> {
        let now = self.clock.now();
        let id = self.next_trade_id;
        let stock = self.stocks.get_mut(symbol).ok_or_else(|| GbceError::NotFound {
            symbol: symbol.to_string(),
        })?;

        // A wall clock can step backwards; never stamp before the last trade.
        let timestamp = match stock.last_trade() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        stock.add_trade(Trade {
            id,
            stock_symbol: symbol.to_string(),
            quantity,
            side,
            price,
            timestamp,
        })?;
        self.next_trade_id += 1;

        tracing::debug!(id, symbol, %side, quantity, price, "recorded trade");
        Ok(id)
    }

    /// Applies each price in turn. Unknown symbols are logged and skipped;
    /// an invalid price aborts the remainder of the batch, leaving earlier
    /// entries applied.
    pub fn update_stock_prices<I, S>(&mut self, prices: I) -> Result<PriceUpdateReport, GbceError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut report = PriceUpdateReport::default();
        for (symbol, price) in prices {
            let symbol = symbol.as_ref();
            match self.stocks.get_mut(symbol) {
                Some(stock) => {
                    stock.set_price(price)?;
                    report.updated.push(symbol.to_string());
                }
                None => {
                    tracing::warn!(symbol, "stock not found, price update skipped");
                    report.unknown.push(symbol.to_string());
                }
            }
        }
        Ok(report)
    }

    /// Volume-weighted price of `symbol` over the configured window, as of now.
    pub fn volume_weighted_price(&self, symbol: &str) -> Result<f64, GbceError> {
        let stock = self.find(symbol)?;
        Ok(stock.volume_weighted_price_over(self.clock.now(), self.config.vwap_window))
    }

    pub fn vwap_window(&self) -> Duration {
        self.config.vwap_window
    }

    /// Geometric mean of the current prices of every registered stock.
    pub fn geometric_mean(&self) -> Result<f64, GbceError> {
        let prices: Vec<f64> = self.stocks.values().map(|s| s.price()).collect();
        geometric_mean(&prices).ok_or_else(|| GbceError::InsufficientData {
            reason: "no stocks registered".to_string(),
        })
    }
}

impl Default for Market {
    fn default() -> Self {
        Market::new(MarketConfig::default())
    }
}
