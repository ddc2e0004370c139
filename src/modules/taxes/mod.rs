//! Tax line classification and per-order breakdown
//!
//! The pure core of the crate: no I/O, no shared state.

pub mod models;
pub mod services;

pub use models::{
    AddressCandidate, DetailedTaxLine, Jurisdiction, TaxBreakdown, TaxCategory, TaxLine,
    ValidationResult,
};
pub use services::{classify, validate, Classifier, TaxBreakdownAggregator, TitleClassifier};
