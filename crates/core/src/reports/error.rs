//! Report error types.

use tally_shared::types::PeriodError;
use thiserror::Error;

/// Errors that can occur while setting up a report.
///
/// Derivation itself never fails; these cover the parameters around it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Report kind not recognized.
    #[error("Unknown report: {0}")]
    UnknownReportKind(String),

    /// Invalid report period.
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),
}
