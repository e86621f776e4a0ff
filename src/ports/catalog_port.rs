//! Stock catalog port.

use crate::domain::error::GbceError;
use crate::domain::stock::Stock;

/// Source of stock definitions to register in a market.
pub trait CatalogPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, GbceError>;
}
