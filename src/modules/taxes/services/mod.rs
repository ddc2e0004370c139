pub mod tax_aggregator;
pub mod tax_classifier;

pub use tax_aggregator::{validate, TaxBreakdownAggregator, VALIDATION_TOLERANCE_CENTS};
pub use tax_classifier::{classify, Classifier, TitleClassifier};
