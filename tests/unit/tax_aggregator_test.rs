// Property-based tests for per-order tax aggregation
//
// Validates:
// - Conservation: category accumulators sum exactly to the detail records
// - Idempotence: identical inputs give identical breakdowns
// - One detail record per input line, in input order
// - Jurisdiction: billing wins as a whole, shipping only without billing
// - Malformed amounts degrade to zero instead of failing

use proptest::option;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use setaside::core::CurrencyCode;
use setaside::taxes::{AddressCandidate, TaxBreakdownAggregator, TaxCategory, TaxLine};

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::TestDataFactory;

#[cfg(test)]
mod tax_aggregator_tests {
    use super::*;

    fn aggregator() -> TaxBreakdownAggregator {
        TaxBreakdownAggregator::new(CurrencyCode::usd())
    }

    fn arb_title() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("GST".to_string()),
            Just("PST".to_string()),
            Just("HST".to_string()),
            Just("QST".to_string()),
            Just("CA State Tax".to_string()),
            Just("San Francisco City Tax".to_string()),
            Just("VAT".to_string()),
            Just("Eco Fee".to_string()),
            ".{0,24}",
        ]
    }

    /// Amount strings with exactly two decimals, paired with their cent value
    fn arb_clean_amount() -> impl Strategy<Value = (String, i64)> {
        (0i64..10_000_000i64).prop_map(|cents| (format!("{}.{:02}", cents / 100, cents % 100), cents))
    }

    /// Anything the platform might send, including junk
    fn arb_raw_amount() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            4 => arb_clean_amount().prop_map(|(s, _)| Some(s)),
            1 => "[0-9]{1,6}\\.[0-9]{3,6}".prop_map(Some),
            1 => ".{0,8}".prop_map(Some),
            1 => Just(None),
        ]
    }

    fn arb_line() -> impl Strategy<Value = TaxLine> {
        (arb_title(), arb_raw_amount(), option::of(0u32..10_000u32)).prop_map(
            |(title, amount, rate_bps)| TaxLine {
                title,
                amount,
                rate: rate_bps.map(|bps| rust_decimal::Decimal::new(bps as i64, 4)),
                currency_code: None,
            },
        )
    }

    fn arb_field() -> impl Strategy<Value = Option<String>> {
        option::of("[A-Za-z ]{0,12}")
    }

    fn arb_address() -> impl Strategy<Value = AddressCandidate> {
        (
            arb_field(),
            arb_field(),
            arb_field(),
            arb_field(),
            arb_field(),
            arb_field(),
        )
            .prop_map(
                |(country, country_code, province, province_code, city, postal_code)| {
                    AddressCandidate {
                        country,
                        country_code,
                        province,
                        province_code,
                        city,
                        postal_code,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn test_accumulators_conserve_line_amounts(lines in prop::collection::vec(arb_line(), 0..12)) {
            let breakdown = aggregator().aggregate(&lines, None, None);

            let detailed: i64 = breakdown.detailed_lines.iter().map(|l| l.amount_cents).sum();
            let accumulated = breakdown.gst_amount
                + breakdown.pst_amount
                + breakdown.hst_amount
                + breakdown.qst_amount
                + breakdown.state_tax_amount
                + breakdown.local_tax_amount
                + breakdown.other_tax_amount;

            prop_assert_eq!(accumulated, detailed);
            prop_assert_eq!(breakdown.total_cents(), detailed);
        }

        #[test]
        fn test_each_accumulator_matches_its_lines(lines in prop::collection::vec(arb_line(), 0..12)) {
            let breakdown = aggregator().aggregate(&lines, None, None);

            for category in TaxCategory::ALL {
                let from_lines: i64 = breakdown
                    .detailed_lines
                    .iter()
                    .filter(|l| l.category == category)
                    .map(|l| l.amount_cents)
                    .sum();
                prop_assert_eq!(breakdown.amount_for(category), from_lines, "category {}", category);
                prop_assert!(breakdown.amount_for(category) >= 0);
            }
        }

        #[test]
        fn test_clean_amounts_convert_exactly(
            amounts in prop::collection::vec(arb_clean_amount(), 1..8)
        ) {
            let lines: Vec<TaxLine> = amounts
                .iter()
                .map(|(raw, _)| TaxLine::new("GST", raw.clone()))
                .collect();
            let expected: i64 = amounts.iter().map(|(_, cents)| cents).sum();

            let breakdown = aggregator().aggregate(&lines, None, None);

            prop_assert_eq!(breakdown.gst_amount, expected);
        }

        #[test]
        fn test_aggregation_is_idempotent(
            lines in prop::collection::vec(arb_line(), 0..8),
            billing in option::of(arb_address()),
            shipping in option::of(arb_address())
        ) {
            let agg = aggregator();
            let first = agg.aggregate(&lines, billing.as_ref(), shipping.as_ref());
            let second = agg.aggregate(&lines, billing.as_ref(), shipping.as_ref());

            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_detail_records_follow_input(lines in prop::collection::vec(arb_line(), 0..12)) {
            let breakdown = aggregator().aggregate(&lines, None, None);

            prop_assert_eq!(breakdown.detailed_lines.len(), lines.len());
            for (line, record) in lines.iter().zip(&breakdown.detailed_lines) {
                prop_assert_eq!(&record.title, &line.title);
                prop_assert_eq!(record.rate, line.rate.unwrap_or_default());
                prop_assert_eq!(&record.jurisdiction, &breakdown.jurisdiction);
            }
        }

        #[test]
        fn test_billing_address_wins_whole(
            billing in arb_address(),
            shipping in arb_address()
        ) {
            let lines = TestDataFactory::canadian_tax_lines();

            let both = aggregator().aggregate(&lines, Some(&billing), Some(&shipping));
            let billing_only = aggregator().aggregate(&lines, Some(&billing), None);

            prop_assert_eq!(&both.jurisdiction, &billing_only.jurisdiction);
            prop_assert_eq!(&both.jurisdiction.city, &billing.city);
            prop_assert_eq!(&both.jurisdiction.postal_code, &billing.postal_code);
        }

        #[test]
        fn test_shipping_used_without_billing(shipping in arb_address()) {
            let lines = TestDataFactory::canadian_tax_lines();

            let shipped = aggregator().aggregate(&lines, None, Some(&shipping));

            prop_assert_eq!(&shipped.jurisdiction.city, &shipping.city);
            prop_assert_eq!(&shipped.jurisdiction.postal_code, &shipping.postal_code);
        }
    }

    #[test]
    fn test_jurisdiction_fallback_scenarios() {
        let lines = TestDataFactory::canadian_tax_lines();
        let billing = TestDataFactory::vancouver_address();
        let shipping = TestDataFactory::toronto_address();

        let shipped = aggregator().aggregate(&lines, None, Some(&shipping));
        assert_eq!(shipped.jurisdiction.city.as_deref(), Some("Toronto"));
        assert_eq!(shipped.jurisdiction.province.as_deref(), Some("ON"));
        assert_eq!(shipped.jurisdiction.country.as_deref(), Some("CA"));
        assert_eq!(shipped.jurisdiction.postal_code.as_deref(), Some("M5V 2T6"));

        // Billing has no postal code; shipping's must not leak in
        let billed = aggregator().aggregate(&lines, Some(&billing), Some(&shipping));
        assert_eq!(billed.jurisdiction.city.as_deref(), Some("Vancouver"));
        assert_eq!(billed.jurisdiction.province.as_deref(), Some("BC"));
        assert_eq!(billed.jurisdiction.postal_code, None);

        let nowhere = aggregator().aggregate(&lines, None, None);
        assert!(nowhere.jurisdiction.is_empty());
        assert!(nowhere.detailed_lines.iter().all(|l| l.jurisdiction.is_empty()));
    }

    #[test]
    fn test_canadian_order_scenario() {
        let breakdown = aggregator().aggregate(
            &TestDataFactory::canadian_tax_lines(),
            Some(&TestDataFactory::vancouver_address()),
            None,
        );

        assert_eq!(breakdown.gst_amount, 500);
        assert_eq!(breakdown.pst_amount, 700);
        assert_eq!(breakdown.hst_amount, 0);
        assert_eq!(breakdown.qst_amount, 0);
        assert_eq!(breakdown.state_tax_amount, 0);
        assert_eq!(breakdown.local_tax_amount, 0);
        assert_eq!(breakdown.other_tax_amount, 0);
        assert_eq!(breakdown.jurisdiction.country.as_deref(), Some("CA"));
        assert_eq!(breakdown.jurisdiction.province.as_deref(), Some("BC"));
        assert_eq!(breakdown.jurisdiction.city.as_deref(), Some("Vancouver"));
        assert_eq!(breakdown.detailed_lines[0].rate, dec!(0.05));
        assert_eq!(breakdown.detailed_lines[1].rate, dec!(0.07));
    }

    #[test]
    fn test_us_order_scenario() {
        let lines = vec![TaxLine::new("CA State Tax", "8.25").with_rate(dec!(0.0825))];

        let breakdown = aggregator().aggregate(
            &lines,
            Some(&TestDataFactory::san_francisco_address()),
            None,
        );

        assert_eq!(breakdown.state_tax_amount, 825);
        assert_eq!(breakdown.total_cents(), 825);
        assert_eq!(breakdown.jurisdiction.country.as_deref(), Some("US"));
        assert_eq!(breakdown.jurisdiction.province.as_deref(), Some("CA"));
    }

    #[test]
    fn test_unrecognized_title_scenario() {
        let breakdown = aggregator().aggregate(&[TaxLine::new("Eco Fee", "2.00")], None, None);

        assert_eq!(breakdown.other_tax_amount, 200);
        assert_eq!(breakdown.detailed_lines[0].category, TaxCategory::Other);
    }

    #[test]
    fn test_half_cent_amounts_round_up() {
        let lines = vec![
            TaxLine::new("GST", "0.125"),
            TaxLine::new("GST", "0.124"),
            TaxLine::new("PST", "1.005"),
        ];

        let breakdown = aggregator().aggregate(&lines, None, None);

        assert_eq!(breakdown.gst_amount, 13 + 12);
        assert_eq!(breakdown.pst_amount, 101);
    }
}
