//! Market configuration and its validation.
//!
//! Reads the `[market]` section through [`ConfigPort`]:
//!
//! ```ini
//! [market]
//! vwap_window_seconds = 900
//! ```

use chrono::{Duration, Utc};

use super::error::GbceError;
use super::pricing::DEFAULT_VWAP_WINDOW;
use crate::ports::config_port::ConfigPort;

pub const MARKET_SECTION: &str = "market";
pub const VWAP_WINDOW_KEY: &str = "vwap_window_seconds";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketConfig {
    /// Trailing window for volume-weighted price.
    pub vwap_window: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            vwap_window: DEFAULT_VWAP_WINDOW,
        }
    }
}

pub fn build_market_config(config: &dyn ConfigPort) -> Result<MarketConfig, GbceError> {
    let seconds = config
        .get_int(MARKET_SECTION, VWAP_WINDOW_KEY)
        .map_err(|_| invalid_window("expected a whole number of seconds"))?;
    let vwap_window = match seconds {
        None => DEFAULT_VWAP_WINDOW,
        Some(seconds) => window_from_seconds(seconds)?,
    };
    Ok(MarketConfig { vwap_window })
}

fn invalid_window(reason: &str) -> GbceError {
    GbceError::ConfigInvalid {
        section: MARKET_SECTION.to_string(),
        key: VWAP_WINDOW_KEY.to_string(),
        reason: reason.to_string(),
    }
}

/// The window must be positive and reach back no further than the earliest
/// representable instant.
fn window_from_seconds(seconds: i64) -> Result<Duration, GbceError> {
    if seconds <= 0 {
        return Err(invalid_window("vwap_window_seconds must be positive"));
    }
    let window = Duration::try_seconds(seconds)
        .ok_or_else(|| invalid_window("vwap_window_seconds is out of range"))?;
    if Utc::now().checked_sub_signed(window).is_none() {
        return Err(invalid_window("vwap_window_seconds is out of range"));
    }
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockConfig {
        values: HashMap<(String, String), String>,
    }

    impl MockConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            let values = entries
                .iter()
                .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                .collect();
            Self { values }
        }
    }

    impl ConfigPort for MockConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.values
                .get(&(section.to_string(), key.to_string()))
                .cloned()
        }

        fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
            self.get_string(section, key)
                .map(|raw| raw.trim().parse::<i64>().map_err(|e| format!("{raw}: {e}")))
                .transpose()
        }
    }

    #[test]
    fn defaults_to_fifteen_minutes() {
        let config = build_market_config(&MockConfig::new(&[])).unwrap();
        assert_eq!(config, MarketConfig::default());
        assert_eq!(config.vwap_window, Duration::minutes(15));
    }

    #[test]
    fn reads_window_seconds() {
        let mock = MockConfig::new(&[("market", "vwap_window_seconds", "10")]);
        let config = build_market_config(&mock).unwrap();
        assert_eq!(config.vwap_window, Duration::seconds(10));
    }

    #[test]
    fn rejects_non_positive_window() {
        for raw in ["0", "-5"] {
            let mock = MockConfig::new(&[("market", "vwap_window_seconds", raw)]);
            let err = build_market_config(&mock).unwrap_err();
            assert!(
                matches!(
                    err,
                    GbceError::ConfigInvalid { ref key, .. } if key == "vwap_window_seconds"
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_window() {
        let mock = MockConfig::new(&[("market", "vwap_window_seconds", "ten")]);
        assert!(matches!(
            build_market_config(&mock),
            Err(GbceError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn rejects_window_beyond_calendar_range() {
        for raw in ["9000000000000", "9223372036854775807"] {
            let mock = MockConfig::new(&[("market", "vwap_window_seconds", raw)]);
            let err = build_market_config(&mock).unwrap_err();
            assert!(
                matches!(
                    err,
                    GbceError::ConfigInvalid { ref reason, .. } if reason.contains("range")
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_century_long_window() {
        let seconds: i64 = 100 * 365 * 24 * 3600;
        let raw = seconds.to_string();
        let mock = MockConfig::new(&[("market", "vwap_window_seconds", &raw)]);
        let config = build_market_config(&mock).unwrap();
        assert_eq!(config.vwap_window.num_seconds(), seconds);
    }
}
