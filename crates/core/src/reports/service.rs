//! Report derivation service.
//!
//! Every call derives a fresh view from the full input snapshot. Nothing is
//! carried over from a previous view, so filters and parameter changes can
//! never compound rounding or leave stale groups behind.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::input::ReportInput;
use super::kind::{ReportKind, ReportProfile, RowOrdering};
use super::types::{
    CashSummaryLine, CashSummaryTotals, Diagnostics, GroupView, ReportSummary, ReportView,
    ViewParams,
};
use crate::rollup::{
    closing_balance, count_ungrouped, grand_totals, group_seeded, imbalanced_groups,
    running_balance, validate, validate_with_difference, BalanceStatus, Group, GroupBy, Record,
    RecordFilter, Totals, BALANCE_EPSILON,
};

/// Service for deriving report views.
pub struct ReportService;

impl ReportService {
    /// Derives the view of `kind` for `input` under `params`.
    #[must_use]
    pub fn generate(kind: ReportKind, input: &ReportInput, params: &ViewParams) -> ReportView {
        let profile = kind.profile();
        let filter = params.filter();
        let openings = Self::opening_balances(input);

        let visible = filter.apply(&input.records);
        let seeds: Vec<String> = if profile.uses_openings && profile.grouping != GroupBy::Flat {
            input.openings.iter().map(|(k, _)| k.clone()).collect()
        } else {
            Vec::new()
        };

        let groups: Vec<Group> = group_seeded(
            &visible,
            &seeds,
            |r| profile.grouping.key_of(r),
            profile.category_groups,
        )
        .into_iter()
        .filter(|g| Self::is_group_visible(g, &filter, &openings))
        .map(|g| match profile.ordering {
            RowOrdering::Chronological => g.sorted_chronologically(),
            RowOrdering::Insertion => g,
        })
        .collect();

        let group_views: Vec<GroupView> = groups
            .iter()
            .map(|g| Self::group_view(g, &profile, &openings))
            .collect();

        let totals = grand_totals(&groups);
        let adjusted = validate_with_difference(totals, input.difference.as_ref());
        let imbalanced = if profile.balanced_groups {
            imbalanced_groups(&groups)
        } else {
            Vec::new()
        };

        let summary =
            Self::summary(kind, input, &group_views, &visible, &filter, &adjusted.status);
        let upstream_totals_match = Self::check_upstream(kind, input, &filter, &adjusted.status);

        let diagnostics = Diagnostics {
            total_records: input.records.len(),
            coerced_records: input.coerced_records,
            ungrouped_records: count_ungrouped(&input.records, |r| profile.grouping.key_of(r)),
            visible_records: visible.len(),
        };
        if diagnostics.coerced_records > 0 {
            warn!(
                report = %kind,
                coerced = diagnostics.coerced_records,
                "Coerced malformed amounts to zero"
            );
        }

        debug!(
            report = %kind,
            query = filter.query(),
            include_zero = filter.include_zero(),
            records = diagnostics.total_records,
            visible = diagnostics.visible_records,
            groups = group_views.len(),
            "Derived report view"
        );

        ReportView {
            kind,
            params: params.clone(),
            groups: group_views,
            totals: adjusted.status,
            adjustment: adjusted.adjusted_by.is_some().then_some(adjusted),
            imbalanced_groups: imbalanced,
            summary,
            upstream_totals_match,
            diagnostics,
        }
    }

    /// Opening balance per ledger; repeated ledgers are summed.
    fn opening_balances(input: &ReportInput) -> HashMap<&str, Decimal> {
        let mut openings: HashMap<&str, Decimal> = HashMap::new();
        for (ledger, amount) in &input.openings {
            *openings.entry(ledger.as_str()).or_default() += *amount;
        }
        openings
    }

    /// A group with rows is always shown. A seeded group without rows (a
    /// ledger with no movement in the period) is shown only while no text
    /// query is active, and with zero rows hidden only if its opening is
    /// non-zero.
    fn is_group_visible(
        group: &Group,
        filter: &RecordFilter,
        openings: &HashMap<&str, Decimal>,
    ) -> bool {
        if !group.is_empty() {
            return true;
        }
        if filter.has_query() {
            return false;
        }
        filter.include_zero()
            || openings
                .get(group.key())
                .is_some_and(|opening| !opening.is_zero())
    }

    fn group_view(
        group: &Group,
        profile: &ReportProfile,
        openings: &HashMap<&str, Decimal>,
    ) -> GroupView {
        let status = validate(group.totals());
        if !profile.uses_openings || profile.grouping == GroupBy::Flat {
            return GroupView {
                group: group.clone(),
                status,
                opening: None,
                closing: None,
                running: None,
            };
        }

        let opening = openings.get(group.key()).copied().unwrap_or(Decimal::ZERO);
        let running = profile
            .running_balance
            .then(|| running_balance(group.records(), opening));
        let closing = closing_balance(group, opening, running.as_ref());

        GroupView {
            group: group.clone(),
            status,
            opening: Some(opening),
            closing: Some(closing),
            running,
        }
    }

    fn summary(
        kind: ReportKind,
        input: &ReportInput,
        groups: &[GroupView],
        visible: &[Record],
        filter: &RecordFilter,
        status: &BalanceStatus,
    ) -> ReportSummary {
        match kind {
            ReportKind::LedgerSummary | ReportKind::AccountStatement | ReportKind::CashBook => {
                ReportSummary::Ledgers {
                    total_opening: groups.iter().filter_map(|g| g.opening).sum(),
                    total_closing: groups.iter().filter_map(|g| g.closing).sum(),
                }
            }
            ReportKind::CashSummary => Self::cash_summary(input, visible, filter),
            ReportKind::IncomeStatement => ReportSummary::IncomeStatement {
                total_income: status.total_credit,
                total_expenditure: status.total_debit,
                net_surplus: status.total_credit - status.total_debit,
            },
            ReportKind::BalanceSheet => ReportSummary::BalanceSheet {
                total_assets: status.total_debit,
                total_liabilities_and_equity: status.total_credit,
            },
            ReportKind::Vouchers | ReportKind::AccountJournal | ReportKind::UserTransactions => {
                let imbalanced_count = if kind.profile().balanced_groups {
                    groups.iter().filter(|g| !g.status.is_balanced).count()
                } else {
                    0
                };
                ReportSummary::Groups {
                    group_count: groups.len(),
                    imbalanced_count,
                }
            }
            ReportKind::TrialBalance => ReportSummary::None,
        }
    }

    /// Cash summary lines: one per ledger, seeded by the openings so a ledger
    /// with no movement still shows its balance carried forward.
    fn cash_summary(
        input: &ReportInput,
        visible: &[Record],
        filter: &RecordFilter,
    ) -> ReportSummary {
        let openings = Self::opening_balances(input);
        let seeds: Vec<String> = input.openings.iter().map(|(k, _)| k.clone()).collect();
        let ledgers = group_seeded(visible, &seeds, |r| GroupBy::Primary.key_of(r), false);

        let lines: Vec<CashSummaryLine> = ledgers
            .iter()
            .filter(|g| Self::is_group_visible(g, filter, &openings))
            .map(|g| {
                let opening = openings.get(g.key()).copied().unwrap_or(Decimal::ZERO);
                let series = running_balance(g.records(), opening);
                CashSummaryLine {
                    ledger: g.key().to_string(),
                    opening,
                    inflow: g.subtotal_debit(),
                    outflow: g.subtotal_credit(),
                    closing: closing_balance(g, opening, Some(&series)),
                }
            })
            .collect();

        let total_opening: Decimal = lines.iter().map(|l| l.opening).sum();
        let total_inflow: Decimal = lines.iter().map(|l| l.inflow).sum();
        let total_outflow: Decimal = lines.iter().map(|l| l.outflow).sum();
        let total_closing: Decimal = lines.iter().map(|l| l.closing).sum();
        let verification = total_opening + total_inflow - total_outflow;

        ReportSummary::CashSummary {
            lines,
            totals: CashSummaryTotals {
                total_opening,
                total_inflow,
                total_outflow,
                total_closing,
                verification,
                is_reconciled: verification == total_closing,
            },
        }
    }

    /// Compares the view totals, difference row included, with the totals
    /// upstream computed. Hiding zero rows never moves totals, so only a text
    /// query disables the check.
    fn check_upstream(
        kind: ReportKind,
        input: &ReportInput,
        filter: &RecordFilter,
        status: &BalanceStatus,
    ) -> Option<bool> {
        let upstream = input.upstream_totals?;
        if filter.has_query() {
            return None;
        }
        let matches = (status.total_debit - upstream.debit).abs() < BALANCE_EPSILON
            && (status.total_credit - upstream.credit).abs() < BALANCE_EPSILON;
        if !matches {
            warn!(
                report = %kind,
                debit = %status.total_debit,
                credit = %status.total_credit,
                upstream_debit = %upstream.debit,
                upstream_credit = %upstream.credit,
                "Derived totals disagree with upstream totals"
            );
        }
        Some(matches)
    }
}
