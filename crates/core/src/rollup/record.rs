//! Normalized financial row consumed by the rollup engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Chronological position of a record: date first, then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderKey {
    /// Posting date.
    pub date: NaiveDate,
    /// Tie-breaker within the same date.
    pub sequence: i64,
}

impl OrderKey {
    /// Creates an order key.
    #[must_use]
    pub const fn new(date: NaiveDate, sequence: i64) -> Self {
        Self { date, sequence }
    }
}

/// How a record is treated by filters and renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// A regular line.
    #[default]
    Entry,
    /// Synthetic adjustment that reconciles a known variance.
    Difference,
}

/// One debit/credit line.
///
/// Both amounts are non-negative; the side carries the sign. A record may
/// have both sides at zero (opening placeholders and the like).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Primary grouping key (category, ledger, voucher or user).
    pub group_key: Option<String>,
    /// Secondary key, e.g. the ledger inside a category.
    pub secondary_key: Option<String>,
    /// Chronological ordering key, absent for period-level aggregates.
    pub order_key: Option<OrderKey>,
    /// Display label.
    pub label: String,
    /// Fields matched by free-text search.
    pub searchable: Vec<String>,
    /// Row kind.
    pub kind: RowKind,
}

impl Record {
    /// Creates an entry, moving negative amounts to the opposite side.
    #[must_use]
    pub fn new(label: impl Into<String>, debit: Decimal, credit: Decimal) -> Self {
        let (debit, credit) = normalize_sides(debit, credit);
        let label = label.into();
        Self {
            debit,
            credit,
            group_key: None,
            secondary_key: None,
            order_key: None,
            searchable: vec![label.clone()],
            label,
            kind: RowKind::Entry,
        }
    }

    /// Creates a difference-ledger row.
    #[must_use]
    pub fn difference(name: impl Into<String>, debit: Decimal, credit: Decimal) -> Self {
        Self {
            kind: RowKind::Difference,
            ..Self::new(name, debit, credit)
        }
    }

    /// Sets the primary grouping key.
    #[must_use]
    pub fn with_group(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.searchable.push(key.clone());
        self.group_key = Some(key);
        self
    }

    /// Sets the secondary key.
    #[must_use]
    pub fn with_secondary(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.searchable.push(key.clone());
        self.secondary_key = Some(key);
        self
    }

    /// Sets the chronological ordering key.
    #[must_use]
    pub fn with_order(mut self, date: NaiveDate, sequence: i64) -> Self {
        self.order_key = Some(OrderKey::new(date, sequence));
        self
    }

    /// Adds an extra searchable field (narration, user, voucher number...).
    #[must_use]
    pub fn with_searchable(mut self, field: impl Into<String>) -> Self {
        self.searchable.push(field.into());
        self
    }

    /// Returns true if both sides are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Returns true for rows that bypass the visibility filter.
    #[must_use]
    pub fn is_filter_exempt(&self) -> bool {
        self.kind == RowKind::Difference
    }

    /// Net effect of the row, debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Searchable fields joined for substring matching.
    #[must_use]
    pub fn search_text(&self) -> String {
        self.searchable.join(" ")
    }
}

fn normalize_sides(debit: Decimal, credit: Decimal) -> (Decimal, Decimal) {
    let mut dr = Decimal::ZERO;
    let mut cr = Decimal::ZERO;
    if debit.is_sign_negative() {
        cr += debit.abs();
    } else {
        dr += debit;
    }
    if credit.is_sign_negative() {
        dr += credit.abs();
    } else {
        cr += credit;
    }
    (dr, cr)
}

/// Debit and credit sums over a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
}

impl Totals {
    /// Creates totals from explicit sides.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Sums a slice of records.
    #[must_use]
    pub fn of(records: &[Record]) -> Self {
        records.iter().fold(Self::default(), |acc, r| acc.plus(r))
    }

    /// Adds one record.
    #[must_use]
    pub fn plus(self, record: &Record) -> Self {
        Self {
            debit: self.debit + record.debit,
            credit: self.credit + record.credit,
        }
    }

    /// Debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }
}

impl std::ops::Add for Totals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            debit: self.debit + rhs.debit,
            credit: self.credit + rhs.credit,
        }
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, t| acc + t)
    }
}
