//! Report view types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::kind::ReportKind;
use crate::rollup::{AdjustedBalance, BalanceStatus, Group, RecordFilter, RunningBalanceSeries};

/// User-controlled view parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    /// Free-text search.
    #[serde(default)]
    pub query: String,
    /// Whether zero-amount rows are shown.
    #[serde(default = "default_include_zero")]
    pub include_zero: bool,
}

fn default_include_zero() -> bool {
    true
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            include_zero: true,
        }
    }
}

impl ViewParams {
    /// Creates view parameters.
    #[must_use]
    pub fn new(query: impl Into<String>, include_zero: bool) -> Self {
        Self {
            query: query.into(),
            include_zero,
        }
    }

    /// The record filter these parameters describe.
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        RecordFilter::new(&self.query, self.include_zero)
    }
}

/// One visible group with its derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    /// The group and its subtotals.
    pub group: Group,
    /// Debit/credit status of the group.
    pub status: BalanceStatus,
    /// Opening balance, for ledger-style reports.
    pub opening: Option<Decimal>,
    /// Closing balance, for ledger-style reports.
    pub closing: Option<Decimal>,
    /// Running balance, for statement-style reports.
    pub running: Option<RunningBalanceSeries>,
}

/// One line of the cash summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashSummaryLine {
    /// Cash or bank ledger.
    pub ledger: String,
    /// Opening balance.
    pub opening: Decimal,
    /// Receipts (debits).
    pub inflow: Decimal,
    /// Payments (credits).
    pub outflow: Decimal,
    /// `opening + inflow - outflow`.
    pub closing: Decimal,
}

/// Totals row of the cash summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashSummaryTotals {
    /// Sum of openings.
    pub total_opening: Decimal,
    /// Sum of inflows.
    pub total_inflow: Decimal,
    /// Sum of outflows.
    pub total_outflow: Decimal,
    /// Sum of line closings.
    pub total_closing: Decimal,
    /// `total_opening + total_inflow - total_outflow`.
    pub verification: Decimal,
    /// Whether `verification` equals `total_closing`.
    pub is_reconciled: bool,
}

/// Report-specific figures beyond groups and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportSummary {
    /// Nothing beyond the common fields.
    None,
    /// Ledger-style reports: opening and closing across visible ledgers.
    Ledgers {
        /// Sum of openings.
        total_opening: Decimal,
        /// Sum of closings.
        total_closing: Decimal,
    },
    /// Cash summary lines and totals.
    CashSummary {
        /// One line per visible ledger.
        lines: Vec<CashSummaryLine>,
        /// Totals and verification.
        totals: CashSummaryTotals,
    },
    /// Income statement result.
    IncomeStatement {
        /// Income (credits).
        total_income: Decimal,
        /// Expenditure (debits).
        total_expenditure: Decimal,
        /// `total_income - total_expenditure`; negative is a deficit.
        net_surplus: Decimal,
    },
    /// Balance sheet sides.
    BalanceSheet {
        /// Assets side (debits).
        total_assets: Decimal,
        /// Liabilities and equity side (credits, after adjustment).
        total_liabilities_and_equity: Decimal,
    },
    /// Group counts for voucher and user reports.
    Groups {
        /// Number of visible groups.
        group_count: usize,
        /// Number of imbalanced groups.
        imbalanced_count: usize,
    },
}

/// Data-quality counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Records in the source snapshot.
    pub total_records: usize,
    /// Malformed upstream entries: no amount at all, a non-numeric amount, or
    /// an unreadable date or sequence.
    pub coerced_records: usize,
    /// Records without a grouping key, bucketed as "Ungrouped".
    pub ungrouped_records: usize,
    /// Records visible after filtering.
    pub visible_records: usize,
}

/// Derived, immutable view of one report for one input snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    /// Report kind.
    pub kind: ReportKind,
    /// Parameters the view was derived with.
    pub params: ViewParams,
    /// Visible groups, in first-occurrence order.
    pub groups: Vec<GroupView>,
    /// Report-level status, including any difference-ledger adjustment.
    pub totals: BalanceStatus,
    /// Present when a difference-ledger row was applied.
    pub adjustment: Option<AdjustedBalance>,
    /// Keys of imbalanced groups, for reports whose groups must balance.
    pub imbalanced_groups: Vec<String>,
    /// Report-specific figures.
    pub summary: ReportSummary,
    /// Whether the view totals match upstream's; `None` under a text query or
    /// when upstream sent none.
    pub upstream_totals_match: Option<bool>,
    /// Data-quality counters.
    pub diagnostics: Diagnostics,
}
