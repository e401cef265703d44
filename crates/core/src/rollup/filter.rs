//! Free-text and zero-amount filtering.

use serde::{Deserialize, Serialize};

use super::record::Record;

/// Visibility predicate applied before any totals are computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Lowercased query as typed. Empty means "show all".
    query: String,
    /// Whether rows with both sides at zero stay visible.
    include_zero: bool,
}

impl RecordFilter {
    /// Creates a filter. Blank queries match everything; any other query is
    /// matched as typed, surrounding spaces included.
    #[must_use]
    pub fn new(query: &str, include_zero: bool) -> Self {
        let query = if query.trim().is_empty() {
            String::new()
        } else {
            query.to_lowercase()
        };
        Self {
            query,
            include_zero,
        }
    }

    /// The normalized query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether zero rows are kept.
    #[must_use]
    pub const fn include_zero(&self) -> bool {
        self.include_zero
    }

    /// Returns true if a text query is in effect.
    #[must_use]
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Returns true if the filter cannot hide anything.
    #[must_use]
    pub fn is_passthrough(&self) -> bool {
        !self.has_query() && self.include_zero
    }

    /// Returns true if the record is visible.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        if record.is_filter_exempt() {
            return true;
        }
        if !self.include_zero && record.is_zero() {
            return false;
        }
        self.matches_text(record)
    }

    /// Text half of the predicate.
    #[must_use]
    pub fn matches_text(&self, record: &Record) -> bool {
        !self.has_query() || record.search_text().to_lowercase().contains(&self.query)
    }

    /// Returns the visible records, in input order.
    #[must_use]
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        if self.is_passthrough() {
            return records.to_vec();
        }
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Filters `records` by a case-insensitive substring query and the zero toggle.
#[must_use]
pub fn filter(records: &[Record], query: &str, include_zero: bool) -> Vec<Record> {
    RecordFilter::new(query, include_zero).apply(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("Tuition Fee", Decimal::ZERO, dec!(1200)).with_group("Income"),
            Record::new("Electricity", dec!(300), Decimal::ZERO).with_group("Expenses"),
            Record::new("Suspense", Decimal::ZERO, Decimal::ZERO).with_group("Assets"),
            Record::difference("Difference in opening balance", Decimal::ZERO, Decimal::ZERO),
        ]
    }

    #[test]
    fn test_blank_query_is_passthrough() {
        let records = sample();
        assert_eq!(filter(&records, "   ", true), records);
        assert!(RecordFilter::new("  ", true).is_passthrough());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let visible = filter(&sample(), "tuition", true);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].label, "Tuition Fee");
    }

    #[test]
    fn test_leading_space_is_part_of_query() {
        let records = vec![
            Record::new("Coffee", dec!(20), Decimal::ZERO),
            Record::new("Tuition fee", Decimal::ZERO, dec!(900)),
        ];
        let visible = filter(&records, " fee", true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].label, "Tuition fee");
    }

    #[test]
    fn test_query_matches_group_key() {
        let visible = filter(&sample(), "EXPENSES", true);
        assert_eq!(visible[0].label, "Electricity");
    }

    #[test]
    fn test_zero_rows_dropped_but_difference_row_kept() {
        let visible = filter(&sample(), "", false);
        let labels: Vec<&str> = visible.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Tuition Fee", "Electricity", "Difference in opening balance"]
        );
    }

    #[test]
    fn test_filter_is_idempotent_and_order_preserving() {
        let once = filter(&sample(), "e", false);
        let twice = filter(&once, "e", false);
        assert_eq!(once, twice);
        assert_eq!(once[0].label, "Tuition Fee");
    }
}
