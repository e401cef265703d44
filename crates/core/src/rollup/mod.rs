//! Ledger reconciliation and rollup engine.
//!
//! Pure, re-entrant transforms from records to rollups:
//! - Record model and totals
//! - Grouping with exact decimal subtotals
//! - Free-text and zero-amount filtering
//! - Running and closing balances
//! - Balance validation with a single tolerance

pub mod filter;
pub mod grouping;
pub mod record;
pub mod running;
pub mod validator;

#[cfg(test)]
mod props;

pub use filter::{filter, RecordFilter};
pub use grouping::{
    count_ungrouped, grand_totals, group_by, group_seeded, Group, GroupBy, FLAT_GROUP_KEY,
    UNGROUPED_KEY,
};
pub use record::{OrderKey, Record, RowKind, Totals};
pub use running::{closing_balance, running_balance, BalanceLine, RunningBalanceSeries};
pub use validator::{
    imbalanced_groups, validate, validate_groups, validate_with_difference, AdjustedBalance,
    BalanceStatus, GroupBalance, BALANCE_EPSILON,
};
