use tracing::{debug, info, warn};

use crate::core::CurrencyCode;
use crate::modules::orders::models::{OrderPayload, OrderTaxRecord};
use crate::modules::taxes::services::TaxBreakdownAggregator;

/// Turns decoded orders into stored-ready tax records
///
/// Runs the breakdown and the reconciliation for each order and reports
/// mismatches through the log; it never rejects an order.
#[derive(Clone)]
pub struct OrderTaxService {
    aggregator: TaxBreakdownAggregator,
}

impl OrderTaxService {
    pub fn new(aggregator: TaxBreakdownAggregator) -> Self {
        Self { aggregator }
    }

    /// Service with the built-in classifier and the given fallback currency
    pub fn with_default_currency(default_currency: CurrencyCode) -> Self {
        Self::new(TaxBreakdownAggregator::new(default_currency))
    }

    /// Classify, total, and reconcile one order
    pub fn process(&self, order: &OrderPayload) -> OrderTaxRecord {
        let order_id = order.order_id();
        let currency = order
            .currency_code()
            .unwrap_or_else(|| self.aggregator.default_currency().clone());

        let aggregator = self.aggregator.for_currency(currency.clone());
        let breakdown = aggregator.aggregate(
            &order.tax_lines(),
            order.billing_address.as_ref(),
            order.shipping_address.as_ref(),
        );

        let expected_total_cents = order.expected_total_cents();
        let validation = aggregator.validate(&breakdown, expected_total_cents);

        if validation.is_valid {
            debug!(
                order_id = %order_id,
                currency = %currency,
                total_cents = validation.calculated_total_cents,
                "Order tax breakdown reconciled"
            );
        } else {
            warn!(
                order_id = %order_id,
                currency = %currency,
                expected_cents = validation.expected_total_cents,
                calculated_cents = validation.calculated_total_cents,
                difference_cents = validation.difference_cents,
                "Tax breakdown mismatch, flagging order for review"
            );
        }

        OrderTaxRecord::new(
            order_id,
            order.name.clone(),
            currency,
            order.created_at_utc(),
            breakdown,
            validation,
        )
    }

    /// Process a batch in input order
    pub fn process_all(&self, orders: &[OrderPayload]) -> Vec<OrderTaxRecord> {
        let records: Vec<OrderTaxRecord> = orders.iter().map(|o| self.process(o)).collect();

        let flagged = records.iter().filter(|r| r.needs_review).count();
        info!(
            order_count = records.len(),
            flagged_count = flagged,
            "Processed order tax breakdowns"
        );

        records
    }
}
