#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use gbce::adapters::clock::ManualClock;
use gbce::domain::config::MarketConfig;
use gbce::domain::market::Market;
use gbce::domain::stock::Stock;
use std::io::Write;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

pub fn window_config(seconds: i64) -> MarketConfig {
    MarketConfig {
        vwap_window: Duration::seconds(seconds),
    }
}

/// Empty market on a manual clock starting at [`t0`].
pub fn manual_market(window_seconds: i64) -> (Market, ManualClock) {
    let clock = ManualClock::new(t0());
    let market = Market::with_clock(window_config(window_seconds), Box::new(clock.clone()));
    (market, clock)
}

/// TEA (common) and GIN (preferred) registered at their reference prices.
pub fn tea_gin_market(window_seconds: i64) -> (Market, ManualClock) {
    let (mut market, clock) = manual_market(window_seconds);
    market
        .register(Stock::common("TEA", 0.0, 34.42).unwrap())
        .unwrap();
    market
        .register(Stock::preferred("GIN", 0.02, 100.0, 15.45).unwrap())
        .unwrap();
    (market, clock)
}

pub const CATALOG_CSV: &str = "symbol,type,last_dividend,fixed_dividend,par_value,price\n\
    TEA,common,0,,100,34.42\n\
    POP,preferred,,3.5,100,47.48\n\
    ALE,common,23,,60,24.43\n\
    GIN,preferred,8,2,100,15.45\n\
    JOE,common,13,,250,33.52\n";

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
