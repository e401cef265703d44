//! Maps an upstream payload into engine records for one report kind.

use rust_decimal::Decimal;
use tally_core::reports::{KeyField, ReportInput, ReportKind};
use tally_core::rollup::{Record, Totals, UNGROUPED_KEY};
use tracing::debug;

use crate::payload::{PayloadRow, ReportPayload};

/// Builds the engine input for `kind` from `payload`.
///
/// Nested group rows inherit the group name as their category. Rows flagged
/// `is_difference` are folded into the difference slot together with any
/// explicit `difference` entry. Openings without a ledger name go to the
/// ungrouped bucket.
#[must_use]
pub fn to_input(kind: ReportKind, payload: ReportPayload) -> ReportInput {
    let profile = kind.profile();
    let ReportPayload {
        rows,
        groups,
        openings,
        difference,
        totals,
    } = payload;

    let nested = groups.into_iter().flat_map(|group| {
        let name = group.name;
        group.rows.into_iter().map(move |mut row| {
            if non_blank(row.category.as_deref()).is_none() {
                row.category = Some(name.clone());
            }
            row
        })
    });

    let mut records = Vec::new();
    let mut coerced = 0usize;
    let mut adjustment: Option<(String, Decimal, Decimal)> = difference.map(|d| {
        if d.debit.is_coerced() || d.credit.is_coerced() {
            coerced += 1;
        }
        (d.name, d.debit.value(), d.credit.value())
    });

    for row in rows.into_iter().chain(nested) {
        if row.is_malformed() {
            coerced += 1;
        }
        if row.is_difference {
            let label = label_of(&row);
            let (_, debit, credit) =
                adjustment.get_or_insert_with(|| (label, Decimal::ZERO, Decimal::ZERO));
            *debit += row.debit();
            *credit += row.credit();
            continue;
        }
        records.push(to_record(&row, profile.primary_key, profile.secondary_key));
    }

    let openings: Vec<(String, Decimal)> = openings
        .0
        .into_iter()
        .map(|(ledger, amount)| {
            if amount.is_coerced() {
                coerced += 1;
            }
            let ledger = non_blank(Some(ledger.as_str())).unwrap_or(UNGROUPED_KEY);
            (ledger.to_string(), amount.value())
        })
        .collect();

    debug!(
        report = %kind,
        records = records.len(),
        openings = openings.len(),
        coerced,
        "Mapped upstream payload"
    );

    let mut input = ReportInput::new(records)
        .with_openings(openings)
        .with_coerced(coerced);
    if let Some((name, debit, credit)) = adjustment {
        input = input.with_difference(Record::difference(name, debit, credit));
    }
    if let Some(totals) = totals {
        let upstream = Totals::new(totals.debit.value(), totals.credit.value());
        input = input.with_upstream_totals(upstream);
    }
    input
}

fn to_record(row: &PayloadRow, primary: KeyField, secondary: Option<KeyField>) -> Record {
    let mut record = Record::new(label_of(row), row.debit(), row.credit());
    if let Some(key) = field(row, primary) {
        record = record.with_group(key);
    }
    if let Some(key) = secondary.and_then(|f| field(row, f)) {
        record = record.with_secondary(key);
    }
    if let Some(date) = row.date.valid() {
        record = record.with_order(date, row.sequence.valid().unwrap_or_default());
    }

    let extras = [
        non_blank(row.narration.as_deref()),
        field(row, KeyField::Category),
        field(row, KeyField::Ledger),
        field(row, KeyField::Voucher),
        field(row, KeyField::User),
    ];
    for extra in extras.into_iter().flatten() {
        if !record.searchable.iter().any(|s| s == extra) {
            record = record.with_searchable(extra);
        }
    }
    record
}

fn field(row: &PayloadRow, key: KeyField) -> Option<&str> {
    let value = match key {
        KeyField::Category => row.category.as_deref(),
        KeyField::Ledger => row.ledger.as_deref(),
        KeyField::Voucher => row.voucher.as_deref(),
        KeyField::User => row.user.as_deref(),
    };
    non_blank(value)
}

/// Label falls back to ledger, then voucher, then category.
fn label_of(row: &PayloadRow) -> String {
    non_blank(row.label.as_deref())
        .or_else(|| field(row, KeyField::Ledger))
        .or_else(|| field(row, KeyField::Voucher))
        .or_else(|| field(row, KeyField::Category))
        .unwrap_or_default()
        .to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
