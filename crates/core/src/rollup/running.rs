//! Running balance calculations.
//!
//! `balance_after[i] = balance_after[i - 1] + debit[i] - credit[i]`, seeded by
//! an opening balance. Input must already be in the order the report wants;
//! nothing here sorts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::grouping::Group;
use super::record::Record;

/// A record together with the balance after applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    /// The record.
    pub record: Record,
    /// Balance before this record.
    pub previous_balance: Decimal,
    /// Balance after this record.
    pub balance_after: Decimal,
}

/// Ordered running-balance series for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalanceSeries {
    opening: Decimal,
    lines: Vec<BalanceLine>,
}

impl RunningBalanceSeries {
    /// Opening balance the series was seeded with.
    #[must_use]
    pub const fn opening(&self) -> Decimal {
        self.opening
    }

    /// Lines in input order.
    #[must_use]
    pub fn lines(&self) -> &[BalanceLine] {
        &self.lines
    }

    /// Balance after the last line, `None` for an empty series.
    #[must_use]
    pub fn last_balance(&self) -> Option<Decimal> {
        self.lines.last().map(|line| line.balance_after)
    }

    /// Returns true if the series has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds the running balance for pre-ordered records.
#[must_use]
pub fn running_balance(records: &[Record], opening: Decimal) -> RunningBalanceSeries {
    let mut balance = opening;
    let lines = records
        .iter()
        .map(|record| {
            let previous_balance = balance;
            balance = previous_balance + record.debit - record.credit;
            BalanceLine {
                record: record.clone(),
                previous_balance,
                balance_after: balance,
            }
        })
        .collect();

    RunningBalanceSeries { opening, lines }
}

/// Closing balance of a group.
///
/// With a non-empty series the closing balance is its last `balance_after`.
/// A group with no records (a ledger with no movement in the period) has no
/// last line, so the closing balance falls back to
/// `opening + subtotal_debit - subtotal_credit`.
#[must_use]
pub fn closing_balance(
    group: &Group,
    opening: Decimal,
    series: Option<&RunningBalanceSeries>,
) -> Decimal {
    match series.and_then(RunningBalanceSeries::last_balance) {
        Some(last) => last,
        None => opening + group.subtotal_debit() - group.subtotal_credit(),
    }
}
