use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::CurrencyCode;
use crate::modules::taxes::models::{Jurisdiction, TaxCategory};

/// Classified tax totals for one order, in minor currency units
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub gst_amount: i64,
    pub pst_amount: i64,
    pub hst_amount: i64,
    pub qst_amount: i64,
    pub state_tax_amount: i64,
    pub local_tax_amount: i64,
    pub other_tax_amount: i64,
    /// Order-level jurisdiction shared by every line
    pub jurisdiction: Jurisdiction,
    /// One record per input line, in input order
    pub detailed_lines: Vec<DetailedTaxLine>,
}

/// Per-line record kept alongside the category totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTaxLine {
    pub category: TaxCategory,
    pub title: String,
    pub amount_cents: i64,
    pub rate: Decimal,
    pub currency_code: CurrencyCode,
    pub jurisdiction: Jurisdiction,
}

impl TaxBreakdown {
    pub fn new(jurisdiction: Jurisdiction) -> Self {
        Self {
            jurisdiction,
            ..Default::default()
        }
    }

    /// Accumulator for a category
    pub fn amount_for(&self, category: TaxCategory) -> i64 {
        match category {
            TaxCategory::Gst => self.gst_amount,
            TaxCategory::Pst => self.pst_amount,
            TaxCategory::Hst => self.hst_amount,
            TaxCategory::Qst => self.qst_amount,
            TaxCategory::State => self.state_tax_amount,
            TaxCategory::Local => self.local_tax_amount,
            TaxCategory::Other => self.other_tax_amount,
        }
    }

    fn accumulator_mut(&mut self, category: TaxCategory) -> &mut i64 {
        match category {
            TaxCategory::Gst => &mut self.gst_amount,
            TaxCategory::Pst => &mut self.pst_amount,
            TaxCategory::Hst => &mut self.hst_amount,
            TaxCategory::Qst => &mut self.qst_amount,
            TaxCategory::State => &mut self.state_tax_amount,
            TaxCategory::Local => &mut self.local_tax_amount,
            TaxCategory::Other => &mut self.other_tax_amount,
        }
    }

    /// Add a classified line: bumps its category total and appends the detail record
    pub fn record(&mut self, line: DetailedTaxLine) {
        let slot = self.accumulator_mut(line.category);
        *slot = slot.saturating_add(line.amount_cents);
        self.detailed_lines.push(line);
    }

    /// `(category, cents)` for all seven categories in taxonomy order
    pub fn categories(&self) -> impl Iterator<Item = (TaxCategory, i64)> + '_ {
        TaxCategory::ALL.into_iter().map(|c| (c, self.amount_for(c)))
    }

    /// Sum of the seven category accumulators
    pub fn total_cents(&self) -> i64 {
        self.categories()
            .fold(0i64, |acc, (_, cents)| acc.saturating_add(cents))
    }

    /// Sum over the detail records; equal to `total_cents` for any breakdown built via `record`
    pub fn detailed_total_cents(&self) -> i64 {
        self.detailed_lines
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.amount_cents))
    }
}

/// Outcome of reconciling a breakdown against the order's reported total tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub calculated_total_cents: i64,
    pub expected_total_cents: i64,
    /// Absolute difference
    pub difference_cents: i64,
}
