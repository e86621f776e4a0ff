//! Built-in Global Beverage Corporation Exchange sample data.

use super::error::GbceError;
use super::stock::Stock;

/// TEA, POP, ALE, GIN and JOE at their reference prices.
pub fn sample_catalog() -> Result<Vec<Stock>, GbceError> {
    Ok(vec![
        Stock::common("TEA", 0.0, 34.42)?,
        Stock::preferred("POP", 3.5 / 100.0, 100.0, 47.48)?,
        Stock::common("ALE", 23.0, 24.43)?,
        Stock::preferred("GIN", 2.0 / 100.0, 100.0, 15.45)?,
        Stock::common("JOE", 13.0, 33.52)?,
    ])
}
