//! Report derivation.
//!
//! Each report screen is one [`ReportKind`] whose [`ReportProfile`] fixes how
//! rows are keyed, grouped, ordered and checked:
//! - Trial Balance and Balance Sheet
//! - Ledger Summary, Account Statement and Cash Book
//! - Cash Summary
//! - Income Statement
//! - Vouchers, Account Journal and User Transactions

pub mod error;
pub mod input;
pub mod kind;
pub mod service;
pub mod session;
pub mod types;


pub use error::ReportError;
pub use input::ReportInput;
pub use kind::{KeyField, ReportKind, ReportProfile, RowOrdering};
pub use service::ReportService;
pub use session::{ReportSession, SessionSnapshot, SessionState};
pub use types::*;
