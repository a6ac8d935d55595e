//! Infrastructure - configuration and calendar
//!
//! - `config` - Application configuration (TOML loading, defaults)
//! - `calendar` - Dates to day indices; the only reader of the clock

pub mod calendar;
pub mod config;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
