//! Port traits for external dependencies.

pub mod catalog_port;
pub mod clock_port;
pub mod config_port;
