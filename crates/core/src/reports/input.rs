//! Source snapshot a report view is derived from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rollup::{Record, Totals};

/// Everything the upstream API returned for one report request, already
/// mapped into records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInput {
    /// Detail rows, in upstream order.
    pub records: Vec<Record>,
    /// Opening balances per ledger, in upstream order.
    pub openings: Vec<(String, Decimal)>,
    /// Difference-ledger adjustment row.
    pub difference: Option<Record>,
    /// Grand totals as computed upstream.
    pub upstream_totals: Option<Totals>,
    /// Upstream entries that were malformed.
    pub coerced_records: usize,
}

impl ReportInput {
    /// Creates an input from records alone.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Sets opening balances.
    #[must_use]
    pub fn with_openings<I, K>(mut self, openings: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        self.openings = openings.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    /// Sets the difference-ledger row.
    #[must_use]
    pub fn with_difference(mut self, row: Record) -> Self {
        self.difference = Some(row);
        self
    }

    /// Sets the upstream grand totals.
    #[must_use]
    pub const fn with_upstream_totals(mut self, totals: Totals) -> Self {
        self.upstream_totals = Some(totals);
        self
    }

    /// Records how many rows were coerced while parsing.
    #[must_use]
    pub const fn with_coerced(mut self, count: usize) -> Self {
        self.coerced_records = count;
        self
    }
}
