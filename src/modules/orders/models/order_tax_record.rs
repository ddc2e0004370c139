use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::CurrencyCode;
use crate::modules::taxes::models::{TaxBreakdown, ValidationResult};

/// A processed order: its classified breakdown plus the reconciliation verdict
///
/// This is what the surrounding application stores. An order whose breakdown
/// does not reconcile is kept as-is and flagged through `needs_review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTaxRecord {
    pub order_id: String,
    pub order_name: Option<String>,
    pub currency: CurrencyCode,
    pub created_at: Option<DateTime<Utc>>,
    pub breakdown: TaxBreakdown,
    pub validation: ValidationResult,
    pub needs_review: bool,
}

impl OrderTaxRecord {
    pub fn new(
        order_id: String,
        order_name: Option<String>,
        currency: CurrencyCode,
        created_at: Option<DateTime<Utc>>,
        breakdown: TaxBreakdown,
        validation: ValidationResult,
    ) -> Self {
        Self {
            order_id,
            order_name,
            currency,
            created_at,
            breakdown,
            needs_review: !validation.is_valid,
            validation,
        }
    }

    /// Total tax to set aside for this order, in minor units
    pub fn total_cents(&self) -> i64 {
        self.breakdown.total_cents()
    }
}
