use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::amount_to_cents;
use crate::core::CurrencyCode;
use crate::modules::taxes::models::{
    AddressCandidate, DetailedTaxLine, Jurisdiction, TaxBreakdown, TaxLine, ValidationResult,
};
use crate::modules::taxes::services::tax_classifier::{Classifier, TitleClassifier};

/// Largest difference, in minor units, still accepted as rounding drift
///
/// Applied to every currency alike.
pub const VALIDATION_TOLERANCE_CENTS: i64 = 1;

/// Folds an order's tax lines into a classified `TaxBreakdown`
///
/// Stateless apart from its configuration; the same inputs always give the same
/// breakdown, and malformed input degrades instead of failing.
#[derive(Clone)]
pub struct TaxBreakdownAggregator {
    classifier: Arc<dyn Classifier>,
    default_currency: CurrencyCode,
}

impl TaxBreakdownAggregator {
    /// Aggregator using the built-in title classifier
    pub fn new(default_currency: CurrencyCode) -> Self {
        Self::with_classifier(Arc::new(TitleClassifier::new()), default_currency)
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>, default_currency: CurrencyCode) -> Self {
        Self {
            classifier,
            default_currency,
        }
    }

    pub fn default_currency(&self) -> &CurrencyCode {
        &self.default_currency
    }

    /// Same aggregator with a different fallback currency, e.g. the order's own
    pub fn for_currency(&self, currency: CurrencyCode) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            default_currency: currency,
        }
    }

    /// Classify and total an order's tax lines
    ///
    /// Jurisdiction is derived once from `billing`, or from `shipping` only when
    /// there is no billing address, and copied into every detail record.
    pub fn aggregate(
        &self,
        lines: &[TaxLine],
        billing: Option<&AddressCandidate>,
        shipping: Option<&AddressCandidate>,
    ) -> TaxBreakdown {
        let jurisdiction = Jurisdiction::from_addresses(billing, shipping);
        let mut breakdown = TaxBreakdown::new(jurisdiction.clone());

        for line in lines {
            let amount_cents = amount_to_cents(line.amount.as_deref());
            let category = self.classifier.classify(&line.title);

            breakdown.record(DetailedTaxLine {
                category,
                title: line.title.clone(),
                amount_cents,
                rate: line.rate.unwrap_or(Decimal::ZERO),
                currency_code: line
                    .currency_code
                    .clone()
                    .unwrap_or_else(|| self.default_currency.clone()),
                jurisdiction: jurisdiction.clone(),
            });
        }

        debug!(
            line_count = lines.len(),
            total_cents = breakdown.total_cents(),
            country = ?breakdown.jurisdiction.country,
            province = ?breakdown.jurisdiction.province,
            "Tax breakdown aggregated"
        );

        breakdown
    }

    /// Reconcile a breakdown against the order's reported total
    pub fn validate(&self, breakdown: &TaxBreakdown, expected_total_cents: i64) -> ValidationResult {
        validate(breakdown, expected_total_cents)
    }
}

/// Compare a breakdown's category total with the expected total tax
///
/// Valid when the two differ by at most `VALIDATION_TOLERANCE_CENTS`. Advisory
/// only: the breakdown is left untouched either way.
pub fn validate(breakdown: &TaxBreakdown, expected_total_cents: i64) -> ValidationResult {
    let calculated_total_cents = breakdown.total_cents();
    let difference_cents =
        i64::try_from(calculated_total_cents.abs_diff(expected_total_cents)).unwrap_or(i64::MAX);

    ValidationResult {
        is_valid: difference_cents <= VALIDATION_TOLERANCE_CENTS,
        calculated_total_cents,
        expected_total_cents,
        difference_cents,
    }
}
