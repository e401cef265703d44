//! Balance validation at voucher, ledger and report level.
//!
//! One tolerance for every granularity: totals are balanced when
//! `|debit - credit| < BALANCE_EPSILON`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::grouping::Group;
use super::record::{Record, Totals};

/// Balance tolerance, one cent.
pub const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Outcome of a debit/credit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceStatus {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Whether the sides agree within [`BALANCE_EPSILON`].
    pub is_balanced: bool,
    /// `total_debit - total_credit`; positive means debit-heavy.
    pub variance: Decimal,
}

impl BalanceStatus {
    /// Amount by which credits fall short of debits (zero if they do not).
    #[must_use]
    pub fn credit_shortfall(&self) -> Decimal {
        self.variance.max(Decimal::ZERO)
    }

    /// Amount by which debits fall short of credits (zero if they do not).
    #[must_use]
    pub fn debit_shortfall(&self) -> Decimal {
        (-self.variance).max(Decimal::ZERO)
    }
}

/// Validates a pair of totals.
#[must_use]
pub fn validate(totals: Totals) -> BalanceStatus {
    let variance = totals.debit - totals.credit;
    BalanceStatus {
        total_debit: totals.debit,
        total_credit: totals.credit,
        is_balanced: variance.abs() < BALANCE_EPSILON,
        variance,
    }
}

/// Report-level status after folding in a difference-ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedBalance {
    /// Status including the adjustment row.
    pub status: BalanceStatus,
    /// Variance before the adjustment was applied.
    pub unadjusted_variance: Decimal,
    /// Name of the adjustment row, if one was applied.
    pub adjusted_by: Option<String>,
}

/// Validates totals, adding the difference row first when one is supplied.
#[must_use]
pub fn validate_with_difference(totals: Totals, difference: Option<&Record>) -> AdjustedBalance {
    let unadjusted_variance = totals.net();
    match difference {
        Some(row) => AdjustedBalance {
            status: validate(totals.plus(row)),
            unadjusted_variance,
            adjusted_by: Some(row.label.clone()),
        },
        None => AdjustedBalance {
            status: validate(totals),
            unadjusted_variance,
            adjusted_by: None,
        },
    }
}

/// Balance status of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBalance {
    /// Group key.
    pub key: String,
    /// Status of the group's subtotals.
    pub status: BalanceStatus,
}

/// Validates each group, in group order.
#[must_use]
pub fn validate_groups(groups: &[Group]) -> Vec<GroupBalance> {
    groups
        .iter()
        .map(|group| GroupBalance {
            key: group.key().to_string(),
            status: validate(group.totals()),
        })
        .collect()
}

/// Keys of every imbalanced group. Several vouchers can be off at once, so
/// this is a list rather than a flag.
#[must_use]
pub fn imbalanced_groups(groups: &[Group]) -> Vec<String> {
    validate_groups(groups)
        .into_iter()
        .filter(|g| !g.status.is_balanced)
        .map(|g| g.key)
        .collect()
}
