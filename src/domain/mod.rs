//! Core domain types and logic.

pub mod amount;
pub mod config_validation;
pub mod conversion;
pub mod error;
pub mod grammar;
pub mod noise;
pub mod pattern;
pub mod registry;
pub mod scanner;
pub mod tax_year;
pub mod transaction;
