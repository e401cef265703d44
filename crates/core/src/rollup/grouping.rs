//! Grouping and subtotal calculation.
//!
//! Groups keep the first-occurrence order of their key in the input, which is
//! the order upstream reports list their categories in. Subtotals are always
//! derived from the records a group currently holds.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::record::{Record, Totals};

/// Bucket for records whose grouping key is missing.
pub const UNGROUPED_KEY: &str = "Ungrouped";

/// Key of the single group produced by [`GroupBy::Flat`].
pub const FLAT_GROUP_KEY: &str = "All";

/// Which record field drives grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// `Record::group_key`.
    Primary,
    /// `Record::secondary_key`.
    Secondary,
    /// Everything in one group.
    Flat,
}

impl GroupBy {
    /// Returns the key a record is grouped under, `None` if it has none.
    #[must_use]
    pub fn key_of(self, record: &Record) -> Option<&str> {
        match self {
            Self::Primary => record.group_key.as_deref(),
            Self::Secondary => record.secondary_key.as_deref(),
            Self::Flat => Some(FLAT_GROUP_KEY),
        }
    }
}

/// A set of records sharing a key, with its subtotals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    key: String,
    records: Vec<Record>,
    subtotal_debit: Decimal,
    subtotal_credit: Decimal,
    is_category: bool,
}

impl Group {
    /// Builds a group and computes its subtotals.
    #[must_use]
    pub fn from_records(key: impl Into<String>, records: Vec<Record>, is_category: bool) -> Self {
        let totals = Totals::of(&records);
        Self {
            key: key.into(),
            records,
            subtotal_debit: totals.debit,
            subtotal_credit: totals.credit,
            is_category,
        }
    }

    /// Group key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Records in this group.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sum of debits.
    #[must_use]
    pub const fn subtotal_debit(&self) -> Decimal {
        self.subtotal_debit
    }

    /// Sum of credits.
    #[must_use]
    pub const fn subtotal_credit(&self) -> Decimal {
        self.subtotal_credit
    }

    /// Subtotals as a pair.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        Totals::new(self.subtotal_debit, self.subtotal_credit)
    }

    /// Whether this group is a category header (as opposed to a ledger or voucher).
    #[must_use]
    pub const fn is_category(&self) -> bool {
        self.is_category
    }

    /// Returns true if the group holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a copy with records reordered by `order_key` (stable; records
    /// without a key keep their relative position at the end).
    #[must_use]
    pub fn sorted_chronologically(&self) -> Self {
        let mut records = self.records.clone();
        records.sort_by(|a, b| match (a.order_key, b.order_key) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self::from_records(self.key.clone(), records, self.is_category)
    }
}

/// Partitions records by `key_fn`.
///
/// Every record lands in exactly one group; records without a key go to
/// [`UNGROUPED_KEY`]. Empty input yields no groups.
pub fn group_by<'a, F>(records: &'a [Record], key_fn: F, is_category: bool) -> Vec<Group>
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    group_seeded(records, &[], key_fn, is_category)
}

/// Like [`group_by`], but `seeds` open (possibly empty) groups first, in
/// their given order. Used for ledgers that have an opening balance but no
/// rows in the period.
pub fn group_seeded<'a, F>(
    records: &'a [Record],
    seeds: &[String],
    key_fn: F,
    is_category: bool,
) -> Vec<Group>
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<Record>)> = Vec::new();

    for seed in seeds {
        if !index.contains_key(seed) {
            index.insert(seed.clone(), buckets.len());
            buckets.push((seed.clone(), Vec::new()));
        }
    }

    for record in records {
        let key = key_fn(record).unwrap_or(UNGROUPED_KEY);
        let slot = match index.get(key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.to_string(), buckets.len());
                buckets.push((key.to_string(), Vec::new()));
                buckets.len() - 1
            }
        };
        buckets[slot].1.push(record.clone());
    }

    buckets
        .into_iter()
        .map(|(key, records)| Group::from_records(key, records, is_category))
        .collect()
}

/// Number of records that would fall into the ungrouped bucket.
pub fn count_ungrouped<'a, F>(records: &'a [Record], key_fn: F) -> usize
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    records.iter().filter(|r| key_fn(r).is_none()).count()
}

/// Sums the subtotals of a set of groups.
#[must_use]
pub fn grand_totals(groups: &[Group]) -> Totals {
    groups.iter().map(Group::totals).sum()
}
