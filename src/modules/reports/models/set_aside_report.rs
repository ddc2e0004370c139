use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::CurrencyCode;
use crate::modules::taxes::models::TaxCategory;

/// How much collected tax to set aside, over a set of processed orders in one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAsideReport {
    pub currency: CurrencyCode,
    /// Start of the reporting period (inclusive), if one was requested
    pub start_date: Option<NaiveDate>,
    /// End of the reporting period (inclusive), if one was requested
    pub end_date: Option<NaiveDate>,
    pub order_count: usize,
    pub total_cents: i64,
    /// All seven categories, taxonomy order, zero-filled
    pub by_category: Vec<CategoryTotal>,
    /// Sorted by country, then province
    pub by_jurisdiction: Vec<JurisdictionTotal>,
    /// Orders whose breakdown did not reconcile with the reported total
    pub orders_needing_review: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: TaxCategory,
    pub amount_cents: i64,
    /// Number of tax lines that contributed
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionTotal {
    pub country: Option<String>,
    pub province: Option<String>,
    pub amount_cents: i64,
    pub order_count: usize,
}

impl SetAsideReport {
    /// Empty report with every category present at zero
    pub fn empty(
        currency: CurrencyCode,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            currency,
            start_date,
            end_date,
            order_count: 0,
            total_cents: 0,
            by_category: TaxCategory::ALL
                .into_iter()
                .map(|category| CategoryTotal {
                    category,
                    amount_cents: 0,
                    line_count: 0,
                })
                .collect(),
            by_jurisdiction: Vec::new(),
            orders_needing_review: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    pub fn amount_for(&self, category: TaxCategory) -> i64 {
        self.by_category
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount_cents)
            .unwrap_or(0)
    }

    /// Human-readable total, e.g. `CAD 1234.56`
    pub fn formatted_total(&self) -> String {
        self.currency.format_cents(self.total_cents)
    }
}
