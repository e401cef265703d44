//! Property-based tests for the rollup engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::filter::filter;
use super::grouping::{grand_totals, group_by, GroupBy};
use super::record::{Record, Totals};
use super::validator::validate;

/// Amounts from 0.00 to 100,000.00, with a fair share of zeros.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

fn key_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Assets".to_string())),
        Just(Some("Liabilities".to_string())),
        Just(Some("Income".to_string())),
        Just(Some("Expenses".to_string())),
    ]
}

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Cash in hand".to_string()),
        Just("Bank of Baroda".to_string()),
        Just("Tuition Fee".to_string()),
        Just("Hostel Fee".to_string()),
        Just("Salary".to_string()),
        Just("Electricity".to_string()),
    ]
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (label_strategy(), amount_strategy(), amount_strategy(), key_strategy()).prop_map(
        |(label, debit, credit, key)| {
            let record = Record::new(label, debit, credit);
            match key {
                Some(k) => record.with_group(k),
                None => record,
            }
        },
    )
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record_strategy(), 0..60)
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("fee".to_string()),
        Just("BANK".to_string()),
        Just("assets".to_string()),
        Just("  cash ".to_string()),
        Just("zzz".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Grouping never loses or double-counts an amount.
    #[test]
    fn prop_group_subtotals_sum_to_input(records in records_strategy()) {
        let groups = group_by(&records, |r| GroupBy::Primary.key_of(r), true);
        let grouped = grand_totals(&groups);

        prop_assert_eq!(grouped, Totals::of(&records));
        let placed: usize = groups.iter().map(|g| g.records().len()).sum();
        prop_assert_eq!(placed, records.len());
    }

    /// Every group's subtotal equals the sum of its own records.
    #[test]
    fn prop_group_subtotal_matches_its_records(records in records_strategy()) {
        for group in group_by(&records, |r| GroupBy::Primary.key_of(r), false) {
            prop_assert_eq!(group.totals(), Totals::of(group.records()));
        }
    }

    /// Totals shown for a filtered view come from the filtered rows.
    #[test]
    fn prop_filtered_totals_match_visible_rows(
        records in records_strategy(),
        query in query_strategy(),
        include_zero in any::<bool>(),
    ) {
        let visible = filter(&records, &query, include_zero);
        let groups = group_by(&visible, |r| GroupBy::Primary.key_of(r), true);

        prop_assert_eq!(grand_totals(&groups), Totals::of(&visible));
    }

    /// Filtering twice with the same predicate changes nothing.
    #[test]
    fn prop_filter_idempotent(
        records in records_strategy(),
        query in query_strategy(),
        include_zero in any::<bool>(),
    ) {
        let once = filter(&records, &query, include_zero);
        let twice = filter(&once, &query, include_zero);
        prop_assert_eq!(once, twice);
    }

    /// Dropping zero rows never changes totals.
    #[test]
    fn prop_zero_suppression_preserves_totals(records in records_strategy()) {
        let visible = filter(&records, "", false);
        prop_assert_eq!(Totals::of(&visible), Totals::of(&records));
        prop_assert!(visible.iter().all(|r| !r.is_zero()));
    }

    /// Equal sides are always balanced, and the variance is exact.
    #[test]
    fn prop_equal_totals_balanced(side in amount_strategy(), delta_cents in 1i64..1_000_000i64) {
        prop_assert!(validate(Totals::new(side, side)).is_balanced);

        let delta = Decimal::new(delta_cents, 2);
        let status = validate(Totals::new(side + delta, side));
        prop_assert!(!status.is_balanced);
        prop_assert_eq!(status.variance, delta);
    }
}
