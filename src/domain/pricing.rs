//! Volume-weighted price over a trailing time window.
//!
//! Trade logs are kept in timestamp order, so the window bounds are located
//! with binary search instead of a linear scan over the whole history.

use chrono::{DateTime, Duration, Utc};

use super::trade::Trade;

/// Production trailing window: 15 minutes.
pub const DEFAULT_VWAP_WINDOW: Duration = Duration::minutes(15);

/// Short window used by the demonstration harness.
pub const DEMO_VWAP_WINDOW: Duration = Duration::seconds(10);

/// Trades with `now - window <= timestamp <= now`, as a contiguous slice.
///
/// `trades` must be sorted by timestamp. A window reaching past the earliest
/// representable instant covers the whole log up to `now`.
pub fn trades_in_window(trades: &[Trade], now: DateTime<Utc>, window: Duration) -> &[Trade] {
    let start = match now.checked_sub_signed(window) {
        Some(cutoff) => trades.partition_point(|t| t.timestamp < cutoff),
        None if window > Duration::zero() => 0,
        None => return &[],
    };
    let end = trades.partition_point(|t| t.timestamp <= now);
    if start >= end {
        return &[];
    }
    &trades[start..end]
}

/// Σ(price·quantity) / Σ(quantity) over the window, or 0 when it holds no trades.
pub fn volume_weighted_price(trades: &[Trade], now: DateTime<Utc>, window: Duration) -> f64 {
    let (notional, volume) = trades_in_window(trades, now, window)
        .iter()
        .fold((0.0_f64, 0.0_f64), |(notional, volume), t| {
            (notional + t.notional(), volume + t.quantity as f64)
        });
    if volume == 0.0 {
        0.0
    } else {
        notional / volume
    }
}
