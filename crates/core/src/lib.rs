//! Core rollup and reconciliation logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or network dependencies.
//! Records come in already normalized; everything here is a function of them.
//!
//! # Modules
//!
//! - `rollup` - Records, grouping, filtering, running balances and validation
//! - `reports` - Per-report profiles, view derivation and screen sessions

pub mod reports;
pub mod rollup;
