use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::core::{AppError, CurrencyCode, Result};
use crate::modules::orders::models::OrderTaxRecord;
use crate::modules::reports::models::{JurisdictionTotal, SetAsideReport};

/// Builds set-aside reports from processed orders
///
/// Amounts are never mixed across currencies: one report per currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Generate set-aside reports for the given orders
    ///
    /// # Arguments
    /// * `records` - Processed orders, any currency
    /// * `start_date` - Start of reporting period (inclusive)
    /// * `end_date` - End of reporting period (inclusive)
    /// * `currency_filter` - Only report this currency
    ///
    /// When either bound is given, orders without a creation date are left out.
    ///
    /// # Errors
    /// Returns a validation error if start_date > end_date
    pub fn generate(
        &self,
        records: &[OrderTaxRecord],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        currency_filter: Option<&CurrencyCode>,
    ) -> Result<Vec<SetAsideReport>> {
        self.validate_date_range(start_date, end_date)?;

        info!(
            "Generating set-aside report: start={:?}, end={:?}, currency={:?}",
            start_date,
            end_date,
            currency_filter.map(CurrencyCode::as_str)
        );

        let mut by_currency: BTreeMap<&CurrencyCode, Vec<&OrderTaxRecord>> = BTreeMap::new();
        for record in records {
            if currency_filter.is_some_and(|c| c != &record.currency) {
                continue;
            }
            if !in_range(record, start_date, end_date) {
                continue;
            }
            by_currency.entry(&record.currency).or_default().push(record);
        }

        let reports: Vec<SetAsideReport> = by_currency
            .into_iter()
            .map(|(currency, group)| build_report(currency.clone(), start_date, end_date, &group))
            .collect();

        if reports.is_empty() {
            warn!(
                "Empty set-aside report for period {:?} to {:?}",
                start_date, end_date
            );
        } else {
            for report in &reports {
                info!(
                    currency = %report.currency,
                    order_count = report.order_count,
                    total = %report.formatted_total(),
                    needing_review = report.orders_needing_review.len(),
                    "Set-aside report generated"
                );
            }
        }

        Ok(reports)
    }

    /// Check that a requested period is well-formed
    pub fn validate_date_range(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<()> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::validation(format!(
                    "start_date ({}) must be before or equal to end_date ({})",
                    start, end
                )));
            }
        }
        Ok(())
    }
}

fn in_range(record: &OrderTaxRecord, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    let Some(date) = record.created_at.map(|dt| dt.date_naive()) else {
        return false;
    };
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}

fn build_report(
    currency: CurrencyCode,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    records: &[&OrderTaxRecord],
) -> SetAsideReport {
    let mut report = SetAsideReport::empty(currency, start_date, end_date);
    let mut jurisdictions: BTreeMap<(Option<String>, Option<String>), (i64, usize)> =
        BTreeMap::new();

    for record in records {
        let breakdown = &record.breakdown;

        for total in report.by_category.iter_mut() {
            total.amount_cents = total
                .amount_cents
                .saturating_add(breakdown.amount_for(total.category));
        }
        for line in &breakdown.detailed_lines {
            if let Some(total) = report
                .by_category
                .iter_mut()
                .find(|t| t.category == line.category)
            {
                total.line_count += 1;
            }
        }

        let key = (
            breakdown.jurisdiction.country.clone(),
            breakdown.jurisdiction.province.clone(),
        );
        let entry = jurisdictions.entry(key).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(breakdown.total_cents());
        entry.1 += 1;

        report.total_cents = report.total_cents.saturating_add(breakdown.total_cents());
        report.order_count += 1;
        if record.needs_review {
            report.orders_needing_review.push(record.order_id.clone());
        }
    }

    report.by_jurisdiction = jurisdictions
        .into_iter()
        .map(|((country, province), (amount_cents, order_count))| JurisdictionTotal {
            country,
            province,
            amount_cents,
            order_count,
        })
        .collect();

    report
}
