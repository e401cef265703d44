//! Common types used across the application.

pub mod amount;
pub mod period;

pub use amount::Amount;
pub use period::{PeriodError, ReportPeriod};
