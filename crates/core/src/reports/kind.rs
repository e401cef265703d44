//! Report kinds and the rollup profile each one uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::rollup::GroupBy;

/// Every report screen the dashboard serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Category-wise debit/credit totals.
    TrialBalance,
    /// Per-ledger opening, movement and closing.
    LedgerSummary,
    /// Ledger transactions with running balance.
    AccountStatement,
    /// Cash and bank ledgers with running balance.
    CashBook,
    /// Opening, inflow, outflow and closing per cash/bank ledger.
    CashSummary,
    /// Income and expenditure.
    IncomeStatement,
    /// Assets against liabilities and equity.
    BalanceSheet,
    /// Entries grouped by voucher.
    Vouchers,
    /// Vouchers in date order.
    AccountJournal,
    /// Entries grouped by the user who recorded them.
    UserTransactions,
}

/// Payload field that feeds a record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyField {
    /// Account category / group.
    Category,
    /// Ledger (account) name.
    Ledger,
    /// Voucher number.
    Voucher,
    /// Recording user.
    User,
}

/// How rows are ordered inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrdering {
    /// As delivered upstream.
    Insertion,
    /// By date, then sequence.
    Chronological,
}

/// Rollup rules fixed by a report kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProfile {
    /// Field mapped into `Record::group_key`.
    pub primary_key: KeyField,
    /// Field mapped into `Record::secondary_key`.
    pub secondary_key: Option<KeyField>,
    /// Grouping applied to the visible rows.
    pub grouping: GroupBy,
    /// Groups are category headers.
    pub category_groups: bool,
    /// Row ordering inside a group.
    pub ordering: RowOrdering,
    /// Whether a running balance is derived per group.
    pub running_balance: bool,
    /// Whether per-ledger opening balances seed groups.
    pub uses_openings: bool,
    /// Whether each group is expected to balance on its own.
    pub balanced_groups: bool,
}

impl ReportKind {
    /// All kinds in menu order.
    pub const ALL: [Self; 10] = [
        Self::TrialBalance,
        Self::LedgerSummary,
        Self::AccountStatement,
        Self::CashBook,
        Self::CashSummary,
        Self::IncomeStatement,
        Self::BalanceSheet,
        Self::Vouchers,
        Self::AccountJournal,
        Self::UserTransactions,
    ];

    /// URL segment and upstream endpoint name.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TrialBalance => "trial-balance",
            Self::LedgerSummary => "ledger-summary",
            Self::AccountStatement => "account-statement",
            Self::CashBook => "cash-book",
            Self::CashSummary => "cash-summary",
            Self::IncomeStatement => "income-statement",
            Self::BalanceSheet => "balance-sheet",
            Self::Vouchers => "vouchers",
            Self::AccountJournal => "account-journal",
            Self::UserTransactions => "user-transactions",
        }
    }

    /// Rollup rules for this kind.
    #[must_use]
    pub const fn profile(self) -> ReportProfile {
        match self {
            Self::TrialBalance => ReportProfile {
                primary_key: KeyField::Category,
                secondary_key: Some(KeyField::Ledger),
                grouping: GroupBy::Primary,
                category_groups: true,
                ordering: RowOrdering::Insertion,
                running_balance: false,
                uses_openings: false,
                balanced_groups: false,
            },
            Self::BalanceSheet => ReportProfile {
                primary_key: KeyField::Category,
                secondary_key: Some(KeyField::Ledger),
                grouping: GroupBy::Primary,
                category_groups: true,
                ordering: RowOrdering::Insertion,
                running_balance: false,
                uses_openings: false,
                balanced_groups: false,
            },
            Self::LedgerSummary => ReportProfile {
                primary_key: KeyField::Ledger,
                secondary_key: Some(KeyField::Category),
                grouping: GroupBy::Primary,
                category_groups: false,
                ordering: RowOrdering::Insertion,
                running_balance: false,
                uses_openings: true,
                balanced_groups: false,
            },
            Self::AccountStatement | Self::CashBook => ReportProfile {
                primary_key: KeyField::Ledger,
                secondary_key: Some(KeyField::Voucher),
                grouping: GroupBy::Primary,
                category_groups: false,
                ordering: RowOrdering::Chronological,
                running_balance: true,
                uses_openings: true,
                balanced_groups: false,
            },
            Self::CashSummary => ReportProfile {
                primary_key: KeyField::Ledger,
                secondary_key: None,
                grouping: GroupBy::Flat,
                category_groups: false,
                ordering: RowOrdering::Insertion,
                running_balance: true,
                uses_openings: true,
                balanced_groups: false,
            },
            Self::IncomeStatement => ReportProfile {
                primary_key: KeyField::Category,
                secondary_key: Some(KeyField::Ledger),
                grouping: GroupBy::Flat,
                category_groups: false,
                ordering: RowOrdering::Insertion,
                running_balance: false,
                uses_openings: false,
                balanced_groups: false,
            },
            Self::Vouchers => ReportProfile {
                primary_key: KeyField::Voucher,
                secondary_key: Some(KeyField::Ledger),
                grouping: GroupBy::Primary,
                category_groups: false,
                ordering: RowOrdering::Insertion,
                running_balance: false,
                uses_openings: false,
                balanced_groups: true,
            },
            Self::AccountJournal => ReportProfile {
                primary_key: KeyField::Voucher,
                secondary_key: Some(KeyField::Ledger),
                grouping: GroupBy::Primary,
                category_groups: false,
                ordering: RowOrdering::Chronological,
                running_balance: false,
                uses_openings: false,
                balanced_groups: true,
            },
            Self::UserTransactions => ReportProfile {
                primary_key: KeyField::User,
                secondary_key: Some(KeyField::Voucher),
                grouping: GroupBy::Primary,
                category_groups: false,
                ordering: RowOrdering::Chronological,
                running_balance: false,
                uses_openings: false,
                balanced_groups: false,
            },
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| ReportError::UnknownReportKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trial-balance", ReportKind::TrialBalance)]
    #[case("Cash_Book", ReportKind::CashBook)]
    #[case(" vouchers ", ReportKind::Vouchers)]
    #[case("user-transactions", ReportKind::UserTransactions)]
    fn test_parse_slug(#[case] raw: &str, #[case] expected: ReportKind) {
        assert_eq!(raw.parse::<ReportKind>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_kind() {
        assert!(matches!(
            "hostel-rooms".parse::<ReportKind>(),
            Err(ReportError::UnknownReportKind(ref s)) if s == "hostel-rooms"
        ));
    }

    #[test]
    fn test_slug_round_trips_for_every_kind() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.slug().parse::<ReportKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.slug());
        }
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&ReportKind::IncomeStatement).unwrap();
        assert_eq!(json, "\"income-statement\"");
    }

    #[test]
    fn test_running_balance_kinds_use_openings() {
        for kind in ReportKind::ALL {
            let profile = kind.profile();
            if profile.running_balance {
                assert!(profile.uses_openings, "{kind} runs a balance without openings");
            }
        }
        assert!(!ReportKind::TrialBalance.profile().running_balance);
        assert_eq!(ReportKind::IncomeStatement.profile().grouping, GroupBy::Flat);
        assert!(ReportKind::Vouchers.profile().balanced_groups);
    }
}
