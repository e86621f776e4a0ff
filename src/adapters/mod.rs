//! Concrete adapter implementations for ports.

pub mod clock;
pub mod csv_catalog_adapter;
pub mod file_config_adapter;
