//! Core domain types and logic.

pub mod analytics;
pub mod config;
pub mod error;
pub mod market;
pub mod pricing;
pub mod sample;
pub mod stock;
pub mod trade;
