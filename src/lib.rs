//! SetAside Tax Breakdown Library
//!
//! Classifies an order's tax lines into a fixed taxonomy, totals them per
//! category in minor currency units, reconciles the result against the order's
//! reported tax, and summarizes processed orders into set-aside reports.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::orders;
pub use modules::reports;
pub use modules::taxes;
